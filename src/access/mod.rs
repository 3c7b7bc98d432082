//! Reading and writing the state field of an entity.
//!
//! The engine never owns an entity. It reads the current [`StateSet`] and
//! writes the next one through a [`PropertyAccessor`], addressed by the
//! graph's property path.
//!
//! There is no locking here: a read-compute-write in the machine is only as
//! atomic as the accessor and the caller make it.

pub mod error;
pub mod field;
pub mod json;

pub use error::AccessError;
pub use field::FieldAccessor;
pub use json::JsonAccessor;

use crate::core::StateSet;

/// Capability to read and write a state-set at a path on an entity.
pub trait PropertyAccessor<E>: Send + Sync {
    /// Read the state-set at `path`.
    fn read(&self, entity: &E, path: &str) -> Result<StateSet, AccessError>;

    /// Replace the whole state-set at `path`.
    fn write(&self, entity: &mut E, path: &str, states: StateSet) -> Result<(), AccessError>;
}
