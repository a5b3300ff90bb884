//! Scene error types.

use crate::component::ComponentType;
use crate::object_id::ObjectId;

/// Errors raised by misuse of the scene API.
///
/// A message addressed to a missing object, or of a kind no component
/// handles, is not an error; those are reported as `false` by delivery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The object already has a component of this type.
    #[error("{object} already has a {component_type:?} component")]
    DuplicateComponentType {
        object: ObjectId,
        component_type: ComponentType,
    },

    /// The component has already been attached to an object.
    #[error("{component_type:?} component is already owned by {owner}")]
    ComponentAlreadyOwned {
        owner: ObjectId,
        component_type: ComponentType,
    },

    /// No live object has this id.
    #[error("no object found with id {0}")]
    ObjectNotFound(ObjectId),
}
