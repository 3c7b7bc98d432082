//! The graph model: states, transitions and callback registrations.
//!
//! Graphs are loaded from [`GraphConfig`] or assembled with
//! [`GraphBuilder`](crate::builder::GraphBuilder), validated once, and
//! never mutated afterwards.

pub mod config;
pub mod error;
mod model;
mod validate;

pub use config::{CallbackConfig, CallbacksConfig, GraphConfig, TransitionConfig};
pub use error::{GraphError, GraphIssue};
pub use model::{Graph, TransitionSpec};

pub(crate) use validate::validate;

use crate::builder::GraphBuilder;

impl<E> Graph<E> {
    /// Build and validate a graph from configuration.
    ///
    /// Callbacks stay unresolved specs until a machine runs them.
    pub fn from_config(config: GraphConfig) -> Result<Self, GraphError> {
        GraphBuilder::from_config(config).build()
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        Self::from_config(GraphConfig::from_json_str(json)?)
    }
}
