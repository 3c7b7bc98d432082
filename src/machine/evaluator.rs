//! Transition availability and application.

use crate::core::{Callback, CallbackHandler, CallbackPhase, CallbackSpec, StateSet};
use crate::events::{Signal, TransitionEvent};
use crate::graph::TransitionSpec;
use crate::machine::{entity_name, Machine, MachineError, MachineResult};
use crate::resolve::{CallbackResolver, IdentityResolver};
use std::sync::Arc;
use tracing::{debug, trace};

type Handlers<E> = Vec<Arc<dyn Callback<E>>>;

impl<'e, E> Machine<'e, E> {
    /// Whether `transition` can be applied to the entity right now.
    ///
    /// Every state in the current set that the transition consumes is a
    /// branch: the notifier gets a test signal for it and the guards run
    /// against it. A join (more than one consumed state) needs all consumed
    /// states present and every branch to pass. Any other transition needs
    /// one passing branch.
    pub fn can(&self, transition: &str) -> MachineResult<bool> {
        let spec = self.graph.transition_spec(transition)?;
        let states = self.get_state()?;

        let mut branches = Vec::with_capacity(states.len());
        for state in &states {
            if spec.from.contains(state) {
                let passed = self.evaluate_branch(transition, spec, &states, state)?;
                branches.push(passed);
            }
        }

        let available = if spec.is_join() {
            states.is_superset(&spec.from) && branches.iter().all(|&passed| passed)
        } else {
            branches.iter().any(|&passed| passed)
        };

        debug!(
            graph = self.graph.name(),
            transition,
            states = %states,
            join = spec.is_join(),
            available,
            "transition_evaluated"
        );

        Ok(available)
    }

    /// Apply `transition`.
    ///
    /// Returns `Ok(false)` when a pre-transition listener rejects, or when
    /// `soft` is set and `can` refuses. A hard apply that `can` refuses fails
    /// with [`MachineError::TransitionNotAllowed`].
    pub fn apply(&mut self, transition: &str, soft: bool) -> MachineResult<bool> {
        if !self.can(transition)? {
            if soft {
                debug!(
                    graph = self.graph.name(),
                    transition,
                    "transition_soft_refused"
                );
                return Ok(false);
            }
            return Err(MachineError::TransitionNotAllowed {
                transition: transition.to_string(),
                entity: entity_name::<E>(),
                graph: self.graph.name().to_string(),
                states: self.get_state()?,
            });
        }

        let graph = Arc::clone(&self.graph);
        let spec = graph.transition_spec(transition)?;
        let states = self.get_state()?;

        let after = {
            let event = TransitionEvent::new(self, transition, spec, states.clone());

            if self.notify(Signal::PreTransition, &event) {
                debug!(
                    graph = self.graph.name(),
                    transition,
                    "transition_rejected_by_listener"
                );
                return Ok(false);
            }

            // Resolve both phases up front so a resolution failure cannot
            // leave the entity half-transitioned.
            let before = self.resolve_phase(CallbackPhase::Before, &event)?;
            let after = self.resolve_phase(CallbackPhase::After, &event)?;

            let passed = invoke_all(&before, &event);
            trace!(transition, passed, "before_callbacks_ran");
            after
        };

        self.set_state(&spec.to, &spec.from)?;

        let event = TransitionEvent::new(self, transition, spec, states);
        let passed = invoke_all(&after, &event);
        trace!(transition, passed, "after_callbacks_ran");

        if self.notify(Signal::PostTransition, &event) {
            trace!(transition, "post_transition_rejection_ignored");
        }

        debug!(
            graph = self.graph.name(),
            transition,
            from = %event.states(),
            "transition_applied"
        );

        Ok(true)
    }

    fn evaluate_branch(
        &self,
        transition: &str,
        spec: &TransitionSpec,
        states: &StateSet,
        branch: &str,
    ) -> MachineResult<bool> {
        let event =
            TransitionEvent::for_branch(self, transition, spec, states.clone(), branch);

        if self.notify(Signal::TestTransition, &event) {
            trace!(transition, branch, "branch_rejected_by_listener");
            return Ok(false);
        }

        let guards = self.resolve_phase(CallbackPhase::Guard, &event)?;
        let passed = invoke_all(&guards, &event);
        trace!(transition, branch, passed, "branch_evaluated");

        Ok(passed)
    }

    /// Send `signal` to the notifier, if any.
    ///
    /// Returns `true` if a listener rejected the event during a vetoable
    /// signal.
    fn notify(&self, signal: Signal, event: &TransitionEvent<'_, E>) -> bool {
        match &self.notifier {
            Some(notifier) => {
                notifier.notify(signal, event);
                signal.is_vetoable() && event.is_rejected()
            }
            None => false,
        }
    }

    /// Resolve the registrations of `phase` whose filter matches `event`.
    fn resolve_phase(
        &self,
        phase: CallbackPhase,
        event: &TransitionEvent<'_, E>,
    ) -> MachineResult<Handlers<E>> {
        self.graph
            .callbacks(phase)
            .iter()
            .enumerate()
            .filter(|(_, registration)| registration.filter.matches(event))
            .map(|(index, registration)| self.resolve(phase, index, &registration.handler))
            .collect()
    }

    /// Named specs go to the resolver once; later calls reuse its handler.
    fn resolve(
        &self,
        phase: CallbackPhase,
        index: usize,
        handler: &CallbackHandler<E>,
    ) -> MachineResult<Arc<dyn Callback<E>>> {
        let spec = match handler {
            CallbackHandler::Live(callback) => return Ok(Arc::clone(callback)),
            CallbackHandler::Spec(spec) => spec,
        };

        let slot = self.callbacks.slot(phase, index);
        if let Some(cached) = slot.and_then(|slot| slot.get()) {
            return Ok(Arc::clone(cached));
        }

        let resolved = self.resolve_spec(spec)?;
        trace!(handler = %spec.handler, phase = %phase, "callback_resolved");

        Ok(match slot {
            Some(slot) => Arc::clone(slot.get_or_init(|| resolved)),
            None => resolved,
        })
    }

    fn resolve_spec(&self, spec: &CallbackSpec) -> MachineResult<Arc<dyn Callback<E>>> {
        match &self.resolver {
            Some(resolver) => resolver.resolve(spec),
            None => CallbackResolver::<E>::resolve(&IdentityResolver, spec),
        }
    }
}

/// Run every handler in order and AND their results.
///
/// A `false` does not stop the remaining handlers from running.
fn invoke_all<E>(handlers: &[Arc<dyn Callback<E>>], event: &TransitionEvent<'_, E>) -> bool {
    handlers
        .iter()
        .fold(true, |passed, handler| handler.call(event) && passed)
}
