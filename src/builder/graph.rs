//! Builder for constructing graphs.

use crate::core::{
    CallbackFilter, CallbackHandler, CallbackPhase, CallbackRegistration, CallbackSpec, StateSet,
};
use crate::events::TransitionEvent;
use crate::graph::config::{CallbackConfig, DEFAULT_GRAPH_NAME, DEFAULT_PROPERTY_PATH};
use crate::graph::{self, Graph, GraphConfig, GraphError, TransitionSpec};
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for constructing graphs with a fluent API.
///
/// # Example
///
/// ```rust
/// use multistate::builder::GraphBuilder;
/// use multistate::core::{CallbackFilter, StateSet};
///
/// struct Article {
///     state: StateSet,
///     words: usize,
/// }
///
/// let graph = GraphBuilder::<Article>::new()
///     .name("article")
///     .states(["draft", "proofread", "fact_checked", "published"])
///     .transition("review", ["draft"], ["proofread", "fact_checked"])
///     .transition("publish", ["proofread", "fact_checked"], ["published"])
///     .guard(CallbackFilter::new().on("review"), |event| {
///         event.entity().words > 0
///     })
///     .build()
///     .unwrap();
///
/// assert!(graph.transition_spec("publish").unwrap().is_join());
/// ```
pub struct GraphBuilder<E> {
    name: String,
    property_path: Option<String>,
    states: StateSet,
    transitions: Vec<(String, TransitionSpec)>,
    callbacks: HashMap<CallbackPhase, Vec<CallbackRegistration<E>>>,
}

impl<E> GraphBuilder<E> {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
            property_path: None,
            states: StateSet::new(),
            transitions: Vec::new(),
            callbacks: HashMap::new(),
        }
    }

    /// Start from a configuration document. Callbacks stay unresolved specs.
    pub fn from_config(config: GraphConfig) -> Self {
        let mut builder = Self::new().name(config.name).states(config.states);
        if let Some(path) = config.property_path {
            builder = builder.property_path(path);
        }

        for t in config.transitions {
            builder = builder.transition(t.name, t.from, t.to);
        }

        let phases = [
            (CallbackPhase::Guard, config.callbacks.guard),
            (CallbackPhase::Before, config.callbacks.before),
            (CallbackPhase::After, config.callbacks.after),
        ];
        for (phase, entries) in phases {
            for CallbackConfig { filter, spec } in entries {
                builder = builder.spec(phase, filter, spec);
            }
        }

        builder
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Where the state-set lives on the entity. Defaults to `"state"`.
    pub fn property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.insert(state);
        self
    }

    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.states.extend(states);
        self
    }

    /// Declare a transition consuming `from` and producing `to`.
    pub fn transition<F, T>(mut self, name: impl Into<String>, from: F, to: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let spec = TransitionSpec::new(from.into_iter().collect(), to.into_iter().collect());
        self.transitions.push((name.into(), spec));
        self
    }

    /// Register a callback for any phase.
    pub fn register(mut self, phase: CallbackPhase, registration: CallbackRegistration<E>) -> Self {
        self.callbacks.entry(phase).or_default().push(registration);
        self
    }

    /// Register a named callback to be resolved when the phase runs.
    pub fn spec(self, phase: CallbackPhase, filter: CallbackFilter, spec: CallbackSpec) -> Self {
        self.register(
            phase,
            CallbackRegistration {
                filter,
                handler: CallbackHandler::Spec(spec),
            },
        )
    }

    /// Register a live callback.
    pub fn callback<F>(self, phase: CallbackPhase, filter: CallbackFilter, callback: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.register(
            phase,
            CallbackRegistration {
                filter,
                handler: CallbackHandler::Live(Arc::new(callback)),
            },
        )
    }

    /// Add a guard. Guards run once per matching branch state in `can`.
    pub fn guard<F>(self, filter: CallbackFilter, guard: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.callback(CallbackPhase::Guard, filter, guard)
    }

    pub fn before<F>(self, filter: CallbackFilter, callback: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.callback(CallbackPhase::Before, filter, callback)
    }

    pub fn after<F>(self, filter: CallbackFilter, callback: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.callback(CallbackPhase::After, filter, callback)
    }

    /// Build and validate the graph.
    /// Returns every structural issue at once.
    pub fn build(self) -> Result<Graph<E>, GraphError> {
        let index = self
            .transitions
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        let graph = Graph {
            name: self.name,
            property_path: self
                .property_path
                .unwrap_or_else(|| DEFAULT_PROPERTY_PATH.to_string()),
            states: self.states,
            transitions: self.transitions,
            index,
            callbacks: self.callbacks,
        };

        graph::validate(&graph)?;
        Ok(graph)
    }
}

impl<E> Default for GraphBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
