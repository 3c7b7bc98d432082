//! Builder API for ergonomic graph and machine construction.
//!
//! This module provides fluent builders and a macro for assembling graphs in
//! code and binding entities to them.

pub mod error;
pub mod graph;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use graph::GraphBuilder;
pub use machine::MachineBuilder;

use crate::core::CallbackFilter;

/// A filter restricted to a single transition.
///
/// # Example
///
/// ```
/// use multistate::builder::{on, GraphBuilder};
///
/// let graph = GraphBuilder::<()>::new()
///     .states(["A", "B"])
///     .transition("go", ["A"], ["B"])
///     .guard(on("go"), |_| true)
///     .build()
///     .unwrap();
/// ```
pub fn on(transition: impl Into<String>) -> CallbackFilter {
    CallbackFilter::new().on(transition)
}
