//! The scene registry.
//!
//! [`SceneManager`] owns every live [`Object`], hands out their ids and is
//! the single entry point for delivering messages by target id.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::message::Message;
use crate::object::Object;
use crate::object_id::{ObjectId, ObjectIdAllocator};

/// Owns the objects of one scene.
#[derive(Debug)]
pub struct SceneManager {
    config: SceneConfig,
    ids: ObjectIdAllocator,
    /// Live objects in creation order.
    objects: Vec<Object>,
    /// Position of each live object in `objects`.
    objects_by_id: HashMap<ObjectId, usize>,
}

impl SceneManager {
    /// An empty scene with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// An empty scene with `config`.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            ids: ObjectIdAllocator::new(),
            objects: Vec::new(),
            objects_by_id: HashMap::new(),
        }
    }

    /// The configuration this scene was created with.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Create an empty object under a fresh id.
    pub fn create_object(&mut self) -> &mut Object {
        let id = self.ids.allocate();
        let index = self.objects.len();
        self.objects.push(Object::new(id));
        self.objects_by_id.insert(id, index);
        debug!(scene = %self.config.name, object = %id, "object created");
        &mut self.objects[index]
    }

    /// Look up a live object.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if no live object has `id`.
    pub fn find_by_id(&self, id: ObjectId) -> Result<&Object, SceneError> {
        self.objects_by_id
            .get(&id)
            .map(|&index| &self.objects[index])
            .ok_or(SceneError::ObjectNotFound(id))
    }

    /// Mutable counterpart of [`find_by_id`](Self::find_by_id).
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if no live object has `id`.
    pub fn find_by_id_mut(&mut self, id: ObjectId) -> Result<&mut Object, SceneError> {
        let &index = self
            .objects_by_id
            .get(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        Ok(&mut self.objects[index])
    }

    /// Deliver `message` to its target object.
    ///
    /// A message for an id with no live object is dropped and reports
    /// `Ok(false)`; an attach message keeps its component in that case.
    /// Otherwise the result is that of [`Object::route`].
    ///
    /// # Errors
    ///
    /// Attachment errors raised while routing an attach message.
    pub fn deliver(&mut self, message: &mut Message) -> Result<bool, SceneError> {
        let target = message.target();
        let Some(&index) = self.objects_by_id.get(&target) else {
            debug!(
                scene = %self.config.name,
                object = %target,
                kind = ?message.kind(),
                "no such object, message dropped"
            );
            return Ok(false);
        };
        self.objects[index].route(message)
    }

    /// Destroy a live object and every component it owns.
    ///
    /// The id is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ObjectNotFound`] if no live object has `id`.
    pub fn destroy_object(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let index = self
            .objects_by_id
            .remove(&id)
            .ok_or(SceneError::ObjectNotFound(id))?;
        let object = self.objects.remove(index);
        for slot in self.objects_by_id.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        debug!(
            scene = %self.config.name,
            object = %id,
            components = object.component_count(),
            "object destroyed"
        );
        Ok(())
    }

    /// Returns `true` if a live object has `id`.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects_by_id.contains_key(&id)
    }

    /// Number of live objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    /// The id the next [`create_object`](Self::create_object) will assign.
    #[must_use]
    pub fn next_id(&self) -> ObjectId {
        self.ids.peek()
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneManager {
    fn drop(&mut self) {
        if self.config.report_live_objects_on_drop && !self.objects.is_empty() {
            info!(
                scene = %self.config.name,
                live_objects = self.objects.len(),
                "destroying objects still alive at scene teardown"
            );
        }
    }
}
