//! The multi-valued current state of an entity.
//!
//! An entity governed by a graph does not sit in one state at a time. Its
//! "current state" is a set of state identifiers, and a transition consumes
//! some of them and produces others.

use serde::{Deserialize, Serialize};
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

/// A set of state identifiers.
///
/// Ordering is not meaningful to the engine; a `BTreeSet` keeps iteration,
/// logging and serialization deterministic.
///
/// # Example
///
/// ```rust
/// use multistate::core::StateSet;
///
/// let current: StateSet = ["reviewing", "paying"].into_iter().collect();
/// let consumed: StateSet = ["paying"].into_iter().collect();
/// let produced: StateSet = ["paid"].into_iter().collect();
///
/// let next = current.replace(&consumed, &produced);
/// assert!(next.contains("reviewing"));
/// assert!(next.contains("paid"));
/// assert!(!next.contains("paying"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSet(BTreeSet<String>);

impl StateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Check membership of a single state.
    pub fn contains(&self, state: &str) -> bool {
        self.0.contains(state)
    }

    /// Add a state. Returns `false` if it was already present.
    pub fn insert(&mut self, state: impl Into<String>) -> bool {
        self.0.insert(state.into())
    }

    /// Remove a state. Returns `false` if it was not present.
    pub fn remove(&mut self, state: &str) -> bool {
        self.0.remove(state)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// True if every member of `other` is also in `self`.
    pub fn is_superset(&self, other: &StateSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// True if the two sets share at least one member.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Compute `(self - consumed) ∪ produced`.
    ///
    /// This is a pure function; `self` is left untouched.
    pub fn replace(&self, consumed: &StateSet, produced: &StateSet) -> StateSet {
        let remaining = self.0.difference(&consumed.0).cloned();
        Self(remaining.chain(produced.0.iter().cloned()).collect())
    }

    /// Members in sorted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for StateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for StateSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for StateSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{state}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(states: &[&str]) -> StateSet {
        states.iter().copied().collect()
    }

    #[test]
    fn duplicates_collapse() {
        let states = set(&["A", "B", "A"]);
        assert_eq!(states.len(), 2);
        assert!(states.contains("A"));
        assert!(states.contains("B"));
    }

    #[test]
    fn replace_removes_consumed_and_adds_produced() {
        let current = set(&["A", "B", "X"]);
        let next = current.replace(&set(&["A", "B"]), &set(&["C"]));

        assert_eq!(next, set(&["C", "X"]));
        assert_eq!(current, set(&["A", "B", "X"]));
    }

    #[test]
    fn replace_ignores_consumed_states_that_are_absent() {
        let next = set(&["A"]).replace(&set(&["Z"]), &set(&["B"]));
        assert_eq!(next, set(&["A", "B"]));
    }

    #[test]
    fn replace_does_not_duplicate_already_present_states() {
        let next = set(&["A", "B"]).replace(&set(&["A"]), &set(&["B"]));
        assert_eq!(next.to_vec(), vec!["B".to_string()]);
    }

    #[test]
    fn superset_and_intersection() {
        let current = set(&["A", "B"]);

        assert!(current.is_superset(&set(&["A"])));
        assert!(current.is_superset(&set(&["A", "B"])));
        assert!(!current.is_superset(&set(&["A", "C"])));
        assert!(current.intersects(&set(&["B", "C"])));
        assert!(!current.intersects(&set(&["C"])));
        assert!(!StateSet::new().intersects(&current));
    }

    #[test]
    fn display_lists_members_in_order() {
        assert_eq!(set(&["b", "a"]).to_string(), "{a, b}");
        assert_eq!(StateSet::new().to_string(), "{}");
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&set(&["b", "a"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);

        let back: StateSet = serde_json::from_str(r#"["x","x","y"]"#).unwrap();
        assert_eq!(back, set(&["x", "y"]));
    }
}
