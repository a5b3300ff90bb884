//! # scene_math
//!
//! Math types for the scene engine. Re-exports [`glam`] value types, which
//! messages carry as payload, and defines the [`Transform`] component.

pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use transform::{Transform, TransformComponent};
