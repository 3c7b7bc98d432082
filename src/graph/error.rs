//! Graph configuration and construction errors.

use crate::core::CallbackPhase;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or building a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// One or more structural issues, all reported at once.
    #[error("Graph '{graph}' is invalid: {}", join_issues(.issues))]
    Invalid {
        graph: String,
        issues: Vec<GraphIssue>,
    },

    /// The configuration document is not valid JSON for a graph.
    #[error("Failed to parse graph configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("Failed to read graph configuration from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single structural problem found while validating a graph.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphIssue {
    #[error("graph name is empty")]
    EmptyName,

    #[error("property path is empty")]
    EmptyPropertyPath,

    #[error("transition name is empty")]
    EmptyTransitionName,

    #[error("transition '{name}' is declared more than once")]
    DuplicateTransition { name: String },

    #[error("{phase} callback '{handler}' filters on unknown transition '{transition}'")]
    UnknownCallbackTransition {
        phase: CallbackPhase,
        handler: String,
        transition: String,
    },
}

fn join_issues(issues: &[GraphIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
