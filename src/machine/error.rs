//! Errors surfaced by machine operations.

use crate::access::AccessError;
use crate::builder::BuildError;
use crate::core::StateSet;
use thiserror::Error;

/// Result type alias for machine operations.
pub type MachineResult<T> = Result<T, MachineError>;

/// Errors that can occur while binding, evaluating or applying transitions.
///
/// None of these are retried by the engine.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The entity has no readable state field at the graph's property path.
    #[error("Cannot bind entity {entity} to graph '{graph}': {source}")]
    InvalidEntityBinding {
        entity: String,
        graph: String,
        #[source]
        source: AccessError,
    },

    #[error("Transition '{transition}' does not exist in graph '{graph}'")]
    UnknownTransition { transition: String, graph: String },

    /// A hard `apply` of a transition `can` refused.
    #[error(
        "Transition '{transition}' cannot be applied on entity {entity} in graph '{graph}' from states {states}"
    )]
    TransitionNotAllowed {
        transition: String,
        entity: String,
        graph: String,
        states: StateSet,
    },

    #[error("Cannot set state '{state}' on entity {entity}: it is not declared in graph '{graph}'")]
    UndeclaredState {
        state: String,
        entity: String,
        graph: String,
    },

    /// Reading or writing the state field failed after binding.
    #[error("Cannot access states of entity {entity} in graph '{graph}': {source}")]
    PropertyAccessFailure {
        entity: String,
        graph: String,
        #[source]
        source: AccessError,
    },

    #[error("Callback '{handler}' could not be resolved: {reason}")]
    CallbackResolution { handler: String, reason: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}
