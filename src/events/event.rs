//! The per-call transition event.

use crate::core::StateSet;
use crate::graph::TransitionSpec;
use crate::machine::Machine;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Lifecycle signal delivered to an [`EventNotifier`](crate::events::EventNotifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Sent by `can` once per matching branch state. Listeners may reject.
    TestTransition,
    /// Sent by `apply` before any callback runs. Listeners may reject.
    PreTransition,
    /// Sent by `apply` after the new state-set is written.
    PostTransition,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestTransition => "test_transition",
            Self::PreTransition => "pre_transition",
            Self::PostTransition => "post_transition",
        }
    }

    /// Whether rejecting the event during this signal has any effect.
    pub fn is_vetoable(&self) -> bool {
        !matches!(self, Self::PostTransition)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a callback or listener sees of a transition in progress.
///
/// Events live for a single `can`/`apply` call. The state snapshot is taken
/// when the event is created and never refreshed.
pub struct TransitionEvent<'a, E> {
    transition: &'a str,
    spec: &'a TransitionSpec,
    states: StateSet,
    branch: Option<String>,
    machine: &'a Machine<'a, E>,
    rejected: Cell<bool>,
}

impl<'a, E> TransitionEvent<'a, E> {
    pub(crate) fn new(
        machine: &'a Machine<'a, E>,
        transition: &'a str,
        spec: &'a TransitionSpec,
        states: StateSet,
    ) -> Self {
        Self {
            transition,
            spec,
            states,
            branch: None,
            machine,
            rejected: Cell::new(false),
        }
    }

    /// An event evaluating availability from one member of the state-set.
    pub(crate) fn for_branch(
        machine: &'a Machine<'a, E>,
        transition: &'a str,
        spec: &'a TransitionSpec,
        states: StateSet,
        branch: &str,
    ) -> Self {
        Self {
            branch: Some(branch.to_string()),
            ..Self::new(machine, transition, spec, states)
        }
    }

    pub fn transition_name(&self) -> &str {
        self.transition
    }

    pub fn spec(&self) -> &TransitionSpec {
        self.spec
    }

    /// States the transition consumes.
    pub fn from(&self) -> &StateSet {
        &self.spec.from
    }

    /// States the transition produces.
    pub fn to(&self) -> &StateSet {
        &self.spec.to
    }

    /// The entity's state-set when the event was created.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// During guard evaluation, the state this availability check is for.
    pub fn branch_state(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn machine(&self) -> &Machine<'a, E> {
        self.machine
    }

    pub fn entity(&self) -> &E {
        self.machine.get_entity()
    }

    pub fn graph_name(&self) -> &str {
        self.machine.get_graph_name()
    }

    /// Veto the transition. Only honoured for test and pre-transition
    /// signals.
    pub fn reject(&self) {
        self.rejected.set(true);
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected.get()
    }
}

impl<E> fmt::Debug for TransitionEvent<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEvent")
            .field("transition", &self.transition)
            .field("spec", self.spec)
            .field("states", &self.states)
            .field("branch", &self.branch)
            .field("graph", &self.machine.get_graph_name())
            .field("rejected", &self.rejected.get())
            .finish()
    }
}
