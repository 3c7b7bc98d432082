//! Resolved named callbacks, one slot per registration.

use crate::core::{Callback, CallbackPhase};
use crate::graph::Graph;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

type Slot<E> = OnceLock<Arc<dyn Callback<E>>>;

/// Handlers resolved from the named specs of one graph.
///
/// Slots are filled the first time a registration is needed and reused
/// afterwards. Failed resolutions leave the slot empty.
pub(crate) struct CallbackCache<E> {
    slots: HashMap<CallbackPhase, Vec<Slot<E>>>,
}

impl<E> CallbackCache<E> {
    pub(crate) fn new(graph: &Graph<E>) -> Self {
        let slots = CallbackPhase::ALL
            .into_iter()
            .map(|phase| {
                let count = graph.callbacks(phase).len();
                (phase, (0..count).map(|_| OnceLock::new()).collect())
            })
            .collect();

        Self { slots }
    }

    pub(crate) fn slot(&self, phase: CallbackPhase, index: usize) -> Option<&Slot<E>> {
        self.slots.get(&phase).and_then(|slots| slots.get(index))
    }

    /// Number of registrations resolved so far.
    pub(crate) fn resolved(&self) -> usize {
        self.slots
            .values()
            .flatten()
            .filter(|slot| slot.get().is_some())
            .count()
    }
}
