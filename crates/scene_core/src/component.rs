//! Components and their message handler tables.
//!
//! A [`Component<S>`] wraps a piece of per-object state `S` together with a
//! table mapping [`MessageKind`] to a handler. When an object broadcasts a
//! message, each of its components looks the message's kind up in its table
//! and runs the handler if there is one. A component with no handlers is
//! legal; it simply never reacts.
//!
//! Objects store components type-erased, as `Box<dyn AnyComponent>`.
//!
//! # Examples
//!
//! ```rust
//! use glam::Vec3;
//! use scene_core::{Component, ComponentType, Message, ObjectId, SetPosition};
//!
//! #[derive(Debug, Default)]
//! struct Marker {
//!     position: Vec3,
//! }
//!
//! let mut marker = Component::new(ComponentType::Transform, Marker::default());
//! marker.on(|state: &mut Marker, msg: &mut SetPosition| state.position = msg.position);
//!
//! let mut msg = Message::set_position(ObjectId(0), Vec3::X);
//! assert!(marker.dispatch(&mut msg));
//! assert_eq!(marker.state().position, Vec3::X);
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::message::{Message, MessageKind, MessageMut, MessagePayload};
use crate::object_id::ObjectId;

/// Closed set of component kinds. An object holds at most one component of
/// each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    /// Spatial placement: position and rotation.
    Transform,
    /// Gameplay logic attached to an object.
    Behaviour,
}

/// A message handler. Receives the component's state and a view of the
/// message whose target and kind are read-only.
pub type Handler<S> = Box<dyn Fn(&mut S, MessageMut<'_>)>;

pub(crate) mod sealed {
    use crate::error::SceneError;
    use crate::object_id::ObjectId;

    /// The ownership step. Only objects in this crate may call it.
    pub trait Attach {
        fn attach_to_owner(&mut self, owner: ObjectId) -> Result<(), SceneError>;
    }
}

/// Type-erased view of a component, as stored by an [`Object`](crate::Object).
///
/// Implemented by every [`Component<S>`]; it cannot be implemented outside
/// this crate.
pub trait AnyComponent: sealed::Attach + Any + fmt::Debug {
    /// The component's type tag.
    fn component_type(&self) -> ComponentType;

    /// The object this component is attached to, if any.
    fn owner(&self) -> Option<ObjectId>;

    /// Returns `true` if a handler is registered for `kind`.
    fn handles(&self, kind: MessageKind) -> bool;

    /// See [`Component::dispatch`].
    fn dispatch(&mut self, message: &mut Message) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A component: state `S` plus its handler table.
pub struct Component<S> {
    component_type: ComponentType,
    owner: Option<ObjectId>,
    /// Allocated on first registration.
    handlers: Option<HashMap<MessageKind, Handler<S>>>,
    state: S,
}

impl<S: 'static> Component<S> {
    /// Create an unattached component with no handlers.
    #[must_use]
    pub fn new(component_type: ComponentType, state: S) -> Self {
        Self {
            component_type,
            owner: None,
            handlers: None,
            state,
        }
    }

    /// Install the handler for `kind`, replacing any previous one.
    pub fn register_handler<F>(&mut self, kind: MessageKind, handler: F)
    where
        F: Fn(&mut S, MessageMut<'_>) + 'static,
    {
        self.handlers
            .get_or_insert_with(HashMap::new)
            .insert(kind, Box::new(handler));
    }

    /// Install a handler for `M::KIND` that receives the payload struct
    /// directly.
    pub fn on<M, F>(&mut self, handler: F)
    where
        M: MessagePayload,
        F: Fn(&mut S, &mut M) + 'static,
    {
        self.register_handler(M::KIND, move |state, mut message| {
            if let Some(payload) = message.get_mut::<M>() {
                handler(state, payload);
            }
        });
    }

    /// Run the handler registered for the message's kind.
    ///
    /// Returns `false`, with no side effects, when no handler is registered
    /// for that kind.
    pub fn dispatch(&mut self, message: &mut Message) -> bool {
        let Some(handler) = self
            .handlers
            .as_ref()
            .and_then(|table| table.get(&message.kind()))
        else {
            return false;
        };
        handler(&mut self.state, message.view_mut());
        true
    }

    /// The component's type tag.
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// The object this component is attached to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    /// Returns `true` if a handler is registered for `kind`.
    #[must_use]
    pub fn handles(&self, kind: MessageKind) -> bool {
        self.handlers
            .as_ref()
            .is_some_and(|table| table.contains_key(&kind))
    }

    /// The component's state.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The component's state, mutably.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

impl<S: 'static> sealed::Attach for Component<S> {
    fn attach_to_owner(&mut self, owner: ObjectId) -> Result<(), SceneError> {
        if let Some(current) = self.owner {
            return Err(SceneError::ComponentAlreadyOwned {
                owner: current,
                component_type: self.component_type,
            });
        }
        self.owner = Some(owner);
        Ok(())
    }
}

impl<S: fmt::Debug + 'static> AnyComponent for Component<S> {
    fn component_type(&self) -> ComponentType {
        self.component_type
    }

    fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    fn handles(&self, kind: MessageKind) -> bool {
        Component::handles(self, kind)
    }

    fn dispatch(&mut self, message: &mut Message) -> bool {
        Component::dispatch(self, message)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<S: fmt::Debug> fmt::Debug for Component<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<MessageKind> = self
            .handlers
            .as_ref()
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        kinds.sort();
        f.debug_struct("Component")
            .field("component_type", &self.component_type)
            .field("owner", &self.owner)
            .field("handlers", &kinds)
            .field("state", &self.state)
            .finish()
    }
}
