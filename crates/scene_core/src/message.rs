//! Messages: the only way objects and components talk to each other.
//!
//! A [`Message`] pairs an immutable target [`ObjectId`] with a [`Payload`].
//! The payload variant fixes the message's [`MessageKind`] for its whole
//! lifetime; only the fields inside the variant may change, and only
//! handlers change them. Get-style messages use those fields as their
//! out-parameter.
//!
//! Handlers never see the `Message` itself. They receive a [`MessageMut`]
//! view, which exposes the target and kind read-only and the payload fields
//! mutably.
//!
//! ```rust
//! use glam::Vec3;
//! use scene_core::{Message, MessageKind, ObjectId, SetPosition};
//!
//! let msg = Message::set_position(ObjectId(0), Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(msg.kind(), MessageKind::SetPosition);
//! assert_eq!(msg.get::<SetPosition>().unwrap().position, Vec3::new(1.0, 2.0, 3.0));
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::component::AnyComponent;
use crate::object_id::ObjectId;

/// The closed set of message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageKind {
    /// Hand a component over to the target object. Intercepted by the object.
    AttachComponent,
    GetPosition,
    SetPosition,
    GetRotation,
    SetRotation,
}

/// Carries a component to its new owner.
///
/// The component stays inside the message until an object takes it. If the
/// message is never delivered, or attachment is rejected, the component can
/// be recovered with [`Message::take_component`].
#[derive(Debug)]
pub struct AttachComponent {
    component: Option<Box<dyn AnyComponent>>,
}

impl AttachComponent {
    /// Wrap a component for transfer.
    #[must_use]
    pub fn new(component: Box<dyn AnyComponent>) -> Self {
        Self {
            component: Some(component),
        }
    }

    /// The carried component, if no object has taken it yet.
    #[must_use]
    pub fn component(&self) -> Option<&dyn AnyComponent> {
        self.component.as_deref()
    }

    /// Returns `true` once an object has taken ownership of the component.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.component.is_none()
    }

    pub(crate) fn take(&mut self) -> Option<Box<dyn AnyComponent>> {
        self.component.take()
    }

    pub(crate) fn restore(&mut self, component: Box<dyn AnyComponent>) {
        self.component = Some(component);
    }
}

/// Query the target's position. The handler writes `position`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GetPosition {
    pub position: Vec3,
}

/// Overwrite the target's position with `position`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetPosition {
    pub position: Vec3,
}

/// Query the target's rotation. The handler writes `rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GetRotation {
    pub rotation: Quat,
}

/// Overwrite the target's rotation with `rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetRotation {
    pub rotation: Quat,
}

/// Kind-specific message data, one variant per [`MessageKind`].
#[derive(Debug)]
pub enum Payload {
    AttachComponent(AttachComponent),
    GetPosition(GetPosition),
    SetPosition(SetPosition),
    GetRotation(GetRotation),
    SetRotation(SetRotation),
}

impl Payload {
    /// The kind this variant stands for.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Payload::AttachComponent(_) => MessageKind::AttachComponent,
            Payload::GetPosition(_) => MessageKind::GetPosition,
            Payload::SetPosition(_) => MessageKind::SetPosition,
            Payload::GetRotation(_) => MessageKind::GetRotation,
            Payload::SetRotation(_) => MessageKind::SetRotation,
        }
    }
}

/// A payload struct that can be borrowed out of a [`Payload`] by type.
///
/// Implemented for every payload struct in this module. Typed handlers
/// registered through [`Component::on`](crate::Component::on) rely on it.
pub trait MessagePayload: Sized + 'static {
    /// The kind this payload belongs to.
    const KIND: MessageKind;

    fn from_payload(payload: &Payload) -> Option<&Self>;

    fn from_payload_mut(payload: &mut Payload) -> Option<&mut Self>;
}

macro_rules! payload_variants {
    ($($variant:ident),* $(,)?) => {
        $(
            impl MessagePayload for $variant {
                const KIND: MessageKind = MessageKind::$variant;

                fn from_payload(payload: &Payload) -> Option<&Self> {
                    match payload {
                        Payload::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_payload_mut(payload: &mut Payload) -> Option<&mut Self> {
                    match payload {
                        Payload::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Payload {
                fn from(inner: $variant) -> Self {
                    Payload::$variant(inner)
                }
            }
        )*
    };
}

payload_variants!(
    AttachComponent,
    GetPosition,
    SetPosition,
    GetRotation,
    SetRotation,
);

/// A message addressed to one object.
#[derive(Debug)]
pub struct Message {
    target: ObjectId,
    payload: Payload,
}

impl Message {
    /// Build a message for `target`. The target is not validated.
    #[must_use]
    pub fn new(target: ObjectId, payload: impl Into<Payload>) -> Self {
        Self {
            target,
            payload: payload.into(),
        }
    }

    /// Hand `component` over to `target`.
    #[must_use]
    pub fn attach_component(target: ObjectId, component: impl AnyComponent) -> Self {
        Self::new(target, AttachComponent::new(Box::new(component)))
    }

    /// Ask `target` for its position. The payload starts at the origin.
    #[must_use]
    pub fn get_position(target: ObjectId) -> Self {
        Self::new(target, GetPosition::default())
    }

    /// Tell `target` to move to `position`.
    #[must_use]
    pub fn set_position(target: ObjectId, position: Vec3) -> Self {
        Self::new(target, SetPosition { position })
    }

    /// Ask `target` for its rotation. The payload starts at identity.
    #[must_use]
    pub fn get_rotation(target: ObjectId) -> Self {
        Self::new(target, GetRotation::default())
    }

    /// Tell `target` to take on `rotation`.
    #[must_use]
    pub fn set_rotation(target: ObjectId, rotation: Quat) -> Self {
        Self::new(target, SetRotation { rotation })
    }

    /// The object this message is addressed to.
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// The message kind, fixed by the payload variant.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.payload.kind()
    }

    /// The payload, read-only.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// The view handed to handlers during dispatch.
    pub(crate) fn view_mut(&mut self) -> MessageMut<'_> {
        MessageMut {
            target: self.target,
            payload: &mut self.payload,
        }
    }

    /// Borrow the payload as `M`, if this message is of kind `M::KIND`.
    #[must_use]
    pub fn get<M: MessagePayload>(&self) -> Option<&M> {
        M::from_payload(&self.payload)
    }

    /// Mutably borrow the payload fields as `M`, if this message is of kind
    /// `M::KIND`. The kind itself can never change.
    #[must_use]
    pub fn get_mut<M: MessagePayload>(&mut self) -> Option<&mut M> {
        M::from_payload_mut(&mut self.payload)
    }

    /// Reclaim the component carried by an attach message.
    ///
    /// Returns `None` for other kinds, and for attach messages whose
    /// component an object has already taken.
    pub fn take_component(&mut self) -> Option<Box<dyn AnyComponent>> {
        match &mut self.payload {
            Payload::AttachComponent(attach) => attach.take(),
            _ => None,
        }
    }
}

/// A handler's view of the message being dispatched.
///
/// Target and kind are read-only; only the payload fields can be written,
/// so a handler cannot readdress the message or swap its kind in the middle
/// of a broadcast.
#[derive(Debug)]
pub struct MessageMut<'a> {
    target: ObjectId,
    payload: &'a mut Payload,
}

impl MessageMut<'_> {
    /// The object the message is addressed to.
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// The message kind.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.payload.kind()
    }

    /// Borrow the payload as `M`, if the message is of kind `M::KIND`.
    #[must_use]
    pub fn get<M: MessagePayload>(&self) -> Option<&M> {
        M::from_payload(self.payload)
    }

    /// Mutably borrow the payload fields as `M`, if the message is of kind
    /// `M::KIND`.
    #[must_use]
    pub fn get_mut<M: MessagePayload>(&mut self) -> Option<&mut M> {
        M::from_payload_mut(self.payload)
    }
}
