//! Transition history tracking.
//!
//! The machine itself keeps no state, so history is collected from the
//! outside: [`crate::events::HistoryRecorder`] listens for post-transition
//! notifications and records them here.

use super::state::StateSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use multistate::core::{StateSet, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     transition: "pay".to_string(),
///     from: ["checkout"].into_iter().collect(),
///     to: ["paid"].into_iter().collect(),
///     timestamp: Utc::now(),
/// };
/// assert!(record.to.contains("paid"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the applied transition
    pub transition: String,
    /// The full state-set before the transition
    pub from: StateSet,
    /// The full state-set after the transition
    pub to: StateSet,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use multistate::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(TransitionRecord {
///     transition: "start".to_string(),
///     from: ["idle"].into_iter().collect(),
///     to: ["left", "right"].into_iter().collect(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1].len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is not modified.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(record);
        Self { transitions }
    }

    /// The state-sets traversed: the first `from`, then each `to`.
    pub fn get_path(&self) -> Vec<&StateSet> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for record in &self.transitions {
            path.push(&record.to);
        }
        path
    }

    /// Names of the applied transitions, oldest first.
    pub fn transition_names(&self) -> Vec<&str> {
        self.transitions
            .iter()
            .map(|r| r.transition.as_str())
            .collect()
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(states: &[&str]) -> StateSet {
        states.iter().copied().collect()
    }

    fn record(name: &str, from: &[&str], to: &[&str]) -> TransitionRecord {
        TransitionRecord {
            transition: name.to_string(),
            from: set(from),
            to: set(to),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(record("go", &["A"], &["B"]));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_set_sequence() {
        let history = StateHistory::new()
            .record(record("fork", &["A"], &["B", "C"]))
            .record(record("join", &["B", "C"], &["D"]));

        let path = history.get_path();
        assert_eq!(path, vec![&set(&["A"]), &set(&["B", "C"]), &set(&["D"])]);
        assert_eq!(history.transition_names(), vec!["fork", "join"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let mut first = record("a", &["A"], &["B"]);
        first.timestamp = start;
        let mut second = record("b", &["B"], &["C"]);
        second.timestamp = start + chrono::Duration::milliseconds(25);

        let history = StateHistory::new().record(first).record(second);
        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(record("go", &["A"], &["B"]));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(record("go", &["A"], &["B"]));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
