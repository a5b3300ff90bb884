//! # scene_core
//!
//! An in-process entity–component–message core. Objects own components,
//! and all interaction goes through typed messages delivered by target
//! object id.
//!
//! This crate provides:
//!
//! - [`SceneManager`] — owns live objects, assigns ids, delivers messages.
//! - [`Object`] — an addressable container of components.
//! - [`Component`] — per-object state plus a message-kind → handler table.
//! - [`Message`] — an immutable target and kind with a mutable payload.
//! - [`ObjectId`] / [`ObjectIdAllocator`] — monotonically increasing ids.
//! - [`SceneError`] — API misuse errors.
//!
//! Delivery is synchronous and single-threaded: scene → object → each
//! component in attachment order.

pub mod component;
pub mod config;
pub mod error;
pub mod message;
pub mod object;
pub mod object_id;
pub mod scene;

pub use component::{AnyComponent, Component, ComponentType, Handler};
pub use config::SceneConfig;
pub use error::SceneError;
pub use message::{
    AttachComponent, GetPosition, GetRotation, Message, MessageKind, MessageMut, MessagePayload,
    Payload, SetPosition, SetRotation,
};
pub use object::Object;
pub use object_id::{ObjectId, ObjectIdAllocator};
pub use scene::SceneManager;
