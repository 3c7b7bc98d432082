//! Transition history collected from post-transition signals.

use crate::core::{StateHistory, TransitionRecord};
use crate::events::event::{Signal, TransitionEvent};
use crate::events::notifier::EventNotifier;
use chrono::Utc;
use std::sync::{Mutex, PoisonError};

/// Records every applied transition.
///
/// Attach it as (or to) a machine's notifier; it ignores test and
/// pre-transition signals.
#[derive(Debug, Default)]
pub struct HistoryRecorder {
    history: Mutex<StateHistory>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn history(&self) -> StateHistory {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.history.lock().unwrap_or_else(PoisonError::into_inner) = StateHistory::new();
    }
}

impl<E> EventNotifier<E> for HistoryRecorder {
    fn notify(&self, signal: Signal, event: &TransitionEvent<'_, E>) {
        if signal != Signal::PostTransition {
            return;
        }

        let record = TransitionRecord {
            transition: event.transition_name().to_string(),
            from: event.states().clone(),
            to: event.states().replace(event.from(), event.to()),
            timestamp: Utc::now(),
        };

        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        *history = history.record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::JsonAccessor;
    use crate::builder::GraphBuilder;
    use crate::machine::Machine;
    use crate::state_set;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn apply_all(recorder: &Arc<HistoryRecorder>, transitions: &[&str]) {
        let graph = GraphBuilder::<Value>::new()
            .states(["A", "B", "C"])
            .transition("ab", ["A"], ["B"])
            .transition("bc", ["B"], ["C"])
            .build()
            .unwrap();
        let mut entity = json!({ "state": ["A"] });
        let mut machine = Machine::builder()
            .graph(graph)
            .accessor(Arc::new(JsonAccessor))
            .notifier(recorder.clone())
            .build(&mut entity)
            .unwrap();

        for transition in transitions {
            machine.apply(transition, true).unwrap();
        }
    }

    #[test]
    fn records_only_applied_transitions() {
        let recorder = Arc::new(HistoryRecorder::new());
        apply_all(&recorder, &["bc", "ab", "bc"]);

        let history = recorder.history();
        assert_eq!(history.transition_names(), vec!["ab", "bc"]);
        assert_eq!(history.transitions()[0].from, state_set!["A"]);
        assert_eq!(history.transitions()[1].to, state_set!["C"]);
    }

    #[test]
    fn clear_discards_recorded_history() {
        let recorder = Arc::new(HistoryRecorder::new());
        apply_all(&recorder, &["ab"]);
        assert_eq!(recorder.history().len(), 1);

        recorder.clear();
        assert!(recorder.history().is_empty());

        apply_all(&recorder, &["ab", "bc"]);
        assert_eq!(recorder.history().len(), 2);
    }
}
