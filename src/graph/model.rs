//! The immutable graph model.

use crate::core::{CallbackPhase, CallbackRegistration, StateSet};
use crate::machine::{MachineError, MachineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The states a transition consumes and produces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub from: StateSet,
    pub to: StateSet,
}

impl TransitionSpec {
    pub fn new(from: StateSet, to: StateSet) -> Self {
        Self { from, to }
    }

    /// A join consumes more than one concurrent state and requires all of
    /// them to be present.
    pub fn is_join(&self) -> bool {
        self.from.len() > 1
    }
}

/// States, transitions and callback registrations for one kind of entity.
///
/// A graph never changes after construction and is usually shared between
/// machines behind an `Arc`. Build one with
/// [`GraphBuilder`](crate::builder::GraphBuilder) or
/// [`Graph::from_config`].
pub struct Graph<E> {
    pub(crate) name: String,
    pub(crate) property_path: String,
    pub(crate) states: StateSet,
    pub(crate) transitions: Vec<(String, TransitionSpec)>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) callbacks: HashMap<CallbackPhase, Vec<CallbackRegistration<E>>>,
}

impl<E> Graph<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    /// Declared states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a transition by name.
    pub fn transition_spec(&self, name: &str) -> MachineResult<&TransitionSpec> {
        self.index
            .get(name)
            .map(|&i| &self.transitions[i].1)
            .ok_or_else(|| MachineError::UnknownTransition {
                transition: name.to_string(),
                graph: self.name.clone(),
            })
    }

    /// Transitions in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &TransitionSpec)> + '_ {
        self.transitions
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn transition_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.transitions.iter().map(|(name, _)| name.as_str())
    }

    /// Registrations for a phase, in registration order.
    pub fn callbacks(&self, phase: CallbackPhase) -> &[CallbackRegistration<E>] {
        self.callbacks
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<E> Clone for Graph<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            property_path: self.property_path.clone(),
            states: self.states.clone(),
            transitions: self.transitions.clone(),
            index: self.index.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<E> fmt::Debug for Graph<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("property_path", &self.property_path)
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::state_set;

    fn graph() -> Graph<()> {
        GraphBuilder::new()
            .name("review")
            .states(["draft", "legal", "finance", "approved"])
            .transition("submit", ["draft"], ["legal", "finance"])
            .transition("approve", ["legal", "finance"], ["approved"])
            .build()
            .unwrap()
    }

    #[test]
    fn looks_up_transition_specs() {
        let graph = graph();
        let spec = graph.transition_spec("approve").unwrap();

        assert_eq!(spec.from, state_set!["legal", "finance"]);
        assert_eq!(spec.to, state_set!["approved"]);
        assert!(spec.is_join());
        assert!(!graph.transition_spec("submit").unwrap().is_join());
    }

    #[test]
    fn unknown_transition_is_an_error() {
        let err = graph().transition_spec("reject").unwrap_err();
        match err {
            MachineError::UnknownTransition { transition, graph } => {
                assert_eq!(transition, "reject");
                assert_eq!(graph, "review");
            }
            other => panic!("Expected UnknownTransition, got {other:?}"),
        }
    }

    #[test]
    fn validates_states() {
        let graph = graph();
        assert!(graph.is_valid_state("legal"));
        assert!(!graph.is_valid_state("archived"));
    }

    #[test]
    fn transitions_iterate_in_declaration_order() {
        let graph = graph();
        let names: Vec<_> = graph.transition_names().collect();
        assert_eq!(names, vec!["submit", "approve"]);
        assert_eq!(graph.transitions().count(), 2);
    }

    #[test]
    fn property_path_defaults_to_state() {
        assert_eq!(graph().property_path(), "state");
    }

    #[test]
    fn phases_without_registrations_are_empty() {
        assert!(graph().callbacks(CallbackPhase::Guard).is_empty());
    }
}
