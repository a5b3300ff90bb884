//! Objects: addressable containers of components.
//!
//! An [`Object`] exclusively owns its components, in attachment order, and
//! keeps a by-type index over them. Messages routed to an object are either
//! intercepted by the object itself (component attachment) or broadcast to
//! every component it owns.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::component::{AnyComponent, Component, ComponentType};
use crate::error::SceneError;
use crate::message::{AttachComponent, Message, Payload};
use crate::object_id::ObjectId;

/// A component that could not be linked, handed back with the reason.
type Rejected = (SceneError, Box<dyn AnyComponent>);

/// An addressable container of components.
#[derive(Debug)]
pub struct Object {
    id: ObjectId,
    /// Owned components in attachment order.
    components: Vec<Box<dyn AnyComponent>>,
    /// Index into `components`, one entry per component type.
    components_by_type: HashMap<ComponentType, usize>,
}

impl Object {
    pub(crate) fn new(id: ObjectId) -> Self {
        Self {
            id,
            components: Vec::new(),
            components_by_type: HashMap::new(),
        }
    }

    /// The id this object was created with.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Take ownership of `component`.
    ///
    /// # Errors
    ///
    /// - [`SceneError::DuplicateComponentType`] if a component of the same
    ///   type is already attached. The attached one is left untouched.
    /// - [`SceneError::ComponentAlreadyOwned`] if `component` already has an
    ///   owner.
    ///
    /// On error the rejected component is dropped and nothing is linked.
    pub fn attach_component(
        &mut self,
        component: Box<dyn AnyComponent>,
    ) -> Result<(), SceneError> {
        self.link(component).map_err(|(error, _rejected)| error)
    }

    /// Convenience wrapper around [`attach_component`](Self::attach_component).
    ///
    /// # Errors
    ///
    /// Same as [`attach_component`](Self::attach_component).
    pub fn attach(&mut self, component: impl AnyComponent) -> Result<(), SceneError> {
        self.attach_component(Box::new(component))
    }

    /// Returns `true` if a component of `component_type` is attached.
    #[must_use]
    pub fn has_component(&self, component_type: ComponentType) -> bool {
        self.components_by_type.contains_key(&component_type)
    }

    /// The attached component of `component_type`, if any.
    #[must_use]
    pub fn component(&self, component_type: ComponentType) -> Option<&dyn AnyComponent> {
        let &index = self.components_by_type.get(&component_type)?;
        self.components.get(index).map(|component| &**component)
    }

    /// Borrow the state of the attached component of `component_type`, if
    /// it is a `Component<S>`.
    #[must_use]
    pub fn state<S: 'static>(&self, component_type: ComponentType) -> Option<&S> {
        self.component(component_type)?
            .as_any()
            .downcast_ref::<Component<S>>()
            .map(Component::state)
    }

    /// Mutable counterpart of [`state`](Self::state).
    pub fn state_mut<S: 'static>(&mut self, component_type: ComponentType) -> Option<&mut S> {
        let &index = self.components_by_type.get(&component_type)?;
        self.components
            .get_mut(index)?
            .as_any_mut()
            .downcast_mut::<Component<S>>()
            .map(Component::state_mut)
    }

    /// Number of attached components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attached components in attachment order.
    pub fn components(&self) -> impl Iterator<Item = &dyn AnyComponent> {
        self.components.iter().map(|component| &**component)
    }

    /// Route a message addressed to this object.
    ///
    /// Attach messages are handled here and report `Ok(true)`; if attachment
    /// is rejected the component is put back into the message (see
    /// [`Message::take_component`]) and the error is returned. Every other
    /// message goes to all components in attachment order and reports
    /// `Ok(false)`, whether or not a component acted on it.
    ///
    /// # Errors
    ///
    /// Attachment errors, as for [`attach_component`](Self::attach_component).
    pub fn route(&mut self, message: &mut Message) -> Result<bool, SceneError> {
        if let Payload::AttachComponent(attach) = message.payload_mut() {
            self.attach_from_message(attach)?;
            return Ok(true);
        }

        let kind = message.kind();
        for component in &mut self.components {
            let handled = component.dispatch(message);
            trace!(
                object = %self.id,
                component_type = ?component.component_type(),
                ?kind,
                handled,
                "message dispatched"
            );
        }
        Ok(false)
    }

    fn attach_from_message(&mut self, attach: &mut AttachComponent) -> Result<(), SceneError> {
        let Some(component) = attach.take() else {
            debug!(object = %self.id, "attach message already spent");
            return Ok(());
        };
        self.link(component).map_err(|(error, component)| {
            attach.restore(component);
            error
        })
    }

    /// Link `component` into this object. Either the owner, the sequence and
    /// the index are all updated, or none of them are.
    fn link(&mut self, mut component: Box<dyn AnyComponent>) -> Result<(), Rejected> {
        let component_type = component.component_type();

        if self.has_component(component_type) {
            warn!(object = %self.id, ?component_type, "duplicate component type rejected");
            return Err((
                SceneError::DuplicateComponentType {
                    object: self.id,
                    component_type,
                },
                component,
            ));
        }

        if let Err(error) = component.attach_to_owner(self.id) {
            warn!(object = %self.id, ?component_type, %error, "component rejected");
            return Err((error, component));
        }

        self.components_by_type
            .insert(component_type, self.components.len());
        self.components.push(component);
        debug!(object = %self.id, ?component_type, "component attached");
        Ok(())
    }
}
