//! Core value types shared by the graph model and the machine.
//!
//! - [`StateSet`]: the multi-valued current state of an entity
//! - Callback phases, filters, specs and live handlers
//! - Immutable transition history
//!
//! Nothing in this module touches an entity.

mod callback;
mod history;
mod state;

pub use callback::{
    Callback, CallbackFilter, CallbackHandler, CallbackPhase, CallbackRegistration, CallbackSpec,
};
pub use history::{StateHistory, TransitionRecord};
pub use state::StateSet;
