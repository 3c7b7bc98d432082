//! Property-based tests for state-sets and transition evaluation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use multistate::access::JsonAccessor;
use multistate::{state_set, GraphBuilder, Machine, StateSet};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

const STATES: [&str; 5] = ["a", "b", "c", "d", "e"];

prop_compose! {
    fn arbitrary_state_set()(mask in 0u8..32) -> StateSet {
        STATES
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, s)| *s)
            .collect()
    }
}

prop_compose! {
    fn non_empty_state_set()(
        set in arbitrary_state_set().prop_filter("non-empty", |s| !s.is_empty())
    ) -> StateSet {
        set
    }
}

fn entity(states: &StateSet) -> Value {
    json!({ "state": states.to_vec() })
}

fn graph(from: &StateSet, to: &StateSet) -> multistate::Graph<Value> {
    GraphBuilder::new()
        .name("generated")
        .states(STATES)
        .transition("t", from.iter().cloned(), to.iter().cloned())
        .build()
        .unwrap()
}

fn bind<'e>(graph: multistate::Graph<Value>, entity: &'e mut Value) -> Machine<'e, Value> {
    Machine::builder()
        .graph(graph)
        .accessor(Arc::new(JsonAccessor))
        .build(entity)
        .unwrap()
}

proptest! {
    #[test]
    fn replace_matches_set_algebra(
        current in arbitrary_state_set(),
        from in arbitrary_state_set(),
        to in arbitrary_state_set(),
    ) {
        let next = current.replace(&from, &to);

        for state in STATES {
            let expected = (current.contains(state) && !from.contains(state)) || to.contains(state);
            prop_assert_eq!(next.contains(state), expected);
        }
    }

    #[test]
    fn replace_does_not_modify_input(
        current in arbitrary_state_set(),
        from in arbitrary_state_set(),
        to in arbitrary_state_set(),
    ) {
        let before = current.clone();
        let _ = current.replace(&from, &to);
        prop_assert_eq!(current, before);
    }

    #[test]
    fn single_origin_available_iff_origin_held(
        current in arbitrary_state_set(),
        origin in 0usize..5,
        to in arbitrary_state_set(),
    ) {
        let from = state_set![STATES[origin]];
        let mut doc = entity(&current);
        let machine = bind(graph(&from, &to), &mut doc);

        prop_assert_eq!(machine.can("t").unwrap(), current.intersects(&from));
    }

    #[test]
    fn join_available_iff_every_origin_held(
        current in arbitrary_state_set(),
        from in non_empty_state_set().prop_filter("join", |s| s.len() > 1),
        to in arbitrary_state_set(),
    ) {
        let mut doc = entity(&current);
        let machine = bind(graph(&from, &to), &mut doc);

        prop_assert_eq!(machine.can("t").unwrap(), current.is_superset(&from));
    }

    #[test]
    fn soft_refusal_never_mutates(
        current in arbitrary_state_set(),
        from in non_empty_state_set(),
        to in arbitrary_state_set(),
    ) {
        let mut doc = entity(&current);
        let mut machine = bind(graph(&from, &to), &mut doc);

        let available = machine.can("t").unwrap();
        let applied = machine.apply("t", true).unwrap();

        prop_assert_eq!(applied, available);
        if !applied {
            prop_assert_eq!(machine.get_state().unwrap(), current);
        }
    }

    #[test]
    fn apply_commits_replaced_set(
        current in non_empty_state_set(),
        to in arbitrary_state_set(),
    ) {
        // Consume everything held, so the transition is always available.
        let mut doc = entity(&current);
        let mut machine = bind(graph(&current, &to), &mut doc);

        prop_assert!(machine.apply("t", false).unwrap());
        prop_assert_eq!(machine.get_state().unwrap(), current.replace(&current, &to));
        prop_assert_eq!(machine.get_state().unwrap(), to);
    }

    #[test]
    fn state_set_json_is_sorted_and_deduplicated(
        states in prop::collection::vec(0usize..5, 0..10),
    ) {
        let set: StateSet = states.iter().map(|&i| STATES[i]).collect();
        let encoded = serde_json::to_value(&set).unwrap();
        let names: Vec<String> = serde_json::from_value(encoded).unwrap();

        let mut expected: Vec<String> = states.iter().map(|&i| STATES[i].to_string()).collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(names, expected);
    }
}
