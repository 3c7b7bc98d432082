//! Property access errors.

use thiserror::Error;

/// Errors raised while reading or writing an entity's state field.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    /// Nothing lives at the path on this entity.
    #[error("Property path '{path}' does not resolve on the entity")]
    PathNotFound { path: String },

    /// Something lives at the path, but it is not a set of state names.
    #[error("Property at '{path}' is not a state set: {reason}")]
    Malformed { path: String, reason: String },
}
