//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Graph not specified. Call .graph(graph) before .build()")]
    MissingGraph,

    #[error("Property accessor not specified. Call .accessor(accessor) before .build()")]
    MissingAccessor,
}
