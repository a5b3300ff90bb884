//! Object identity and allocation.
//!
//! An [`ObjectId`] is a plain `u64` handle. Identities are handed out by the
//! [`ObjectIdAllocator`] owned by each [`SceneManager`](crate::SceneManager),
//! so two scenes never share a counter.

use serde::{Deserialize, Serialize};

/// The identity of an [`Object`](crate::Object) within one scene.
///
/// Messages carry an `ObjectId` as their target. An id that no live object
/// answers to is still a valid id; delivering to it is simply a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Create an id from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Hands out strictly increasing object ids, starting at 0.
///
/// Ids are never recycled, not even after the object that held one has been
/// destroyed.
#[derive(Debug, Default)]
pub struct ObjectIdAllocator {
    next_id: u64,
}

impl ObjectIdAllocator {
    /// An allocator whose first id is `ObjectId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Allocates a fresh id.
    pub fn allocate(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        ObjectId(id)
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    #[must_use]
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.next_id)
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id
    }
}
