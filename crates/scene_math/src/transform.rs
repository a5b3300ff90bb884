//! Transform component.
//!
//! [`Transform`] holds an object's position and rotation. Built with
//! [`Transform::into_component`], it answers the position and rotation
//! get/set messages.

use glam::{Quat, Vec3};
use scene_core::{Component, ComponentType, GetPosition, GetRotation, SetPosition, SetRotation};

/// A transform component as attached to an object.
pub type TransformComponent = Component<Transform>;

/// Position and rotation in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
}

impl Transform {
    /// Origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// A transform at `position` with `rotation`.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// A transform at `position` with no rotation.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Wrap this transform in a component that handles `SetPosition`,
    /// `GetPosition`, `SetRotation` and `GetRotation`.
    #[must_use]
    pub fn into_component(self) -> TransformComponent {
        let mut component = Component::new(ComponentType::Transform, self);
        component.on(|transform: &mut Transform, msg: &mut SetPosition| {
            transform.position = msg.position;
        });
        component.on(|transform: &mut Transform, msg: &mut GetPosition| {
            msg.position = transform.position;
        });
        component.on(|transform: &mut Transform, msg: &mut SetRotation| {
            transform.rotation = msg.rotation;
        });
        component.on(|transform: &mut Transform, msg: &mut GetRotation| {
            msg.rotation = transform.rotation;
        });
        component
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
