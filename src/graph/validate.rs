//! Structural validation of a graph using `Validation`.
//!
//! Every issue is collected in a single pass so a broken configuration can
//! be fixed in one go. States used by transitions but not declared are not
//! issues here; produced states are checked when a transition is applied.

use crate::core::CallbackPhase;
use crate::graph::error::{GraphError, GraphIssue};
use crate::graph::model::Graph;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphIssue>>;

fn check(ok: bool, issue: impl FnOnce() -> GraphIssue) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue())
    }
}

/// Validate a graph, accumulating ALL issues.
pub(crate) fn validate<E>(graph: &Graph<E>) -> Result<(), GraphError> {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(check(!graph.name.trim().is_empty(), || GraphIssue::EmptyName));
    checks.push(check(!graph.property_path.trim().is_empty(), || {
        GraphIssue::EmptyPropertyPath
    }));

    let mut seen = HashSet::new();
    for (name, _) in &graph.transitions {
        checks.push(check(!name.trim().is_empty(), || {
            GraphIssue::EmptyTransitionName
        }));
        checks.push(check(seen.insert(name.as_str()), || {
            GraphIssue::DuplicateTransition { name: name.clone() }
        }));
    }

    for phase in CallbackPhase::ALL {
        for registration in graph.callbacks(phase) {
            for transition in &registration.filter.on {
                checks.push(check(graph.has_transition(transition), || {
                    GraphIssue::UnknownCallbackTransition {
                        phase,
                        handler: registration.handler.label().to_string(),
                        transition: transition.clone(),
                    }
                }));
            }
        }
    }

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(issues) => Err(GraphError::Invalid {
            graph: graph.name.clone(),
            issues: issues.iter().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GraphBuilder;
    use crate::core::{CallbackFilter, CallbackPhase, CallbackSpec};
    use crate::graph::error::{GraphError, GraphIssue};

    #[test]
    fn accumulates_all_issues() {
        let result = GraphBuilder::<()>::new()
            .name(" ")
            .property_path("")
            .states(["A", "B"])
            .transition("go", ["A"], ["B"])
            .transition("go", ["B"], ["A"])
            .transition("", ["A"], ["B"])
            .spec(
                CallbackPhase::Guard,
                CallbackFilter::new().on("missing"),
                CallbackSpec::new("check"),
            )
            .build();

        match result {
            Err(GraphError::Invalid { issues, .. }) => {
                assert_eq!(issues.len(), 5);
                assert!(issues.contains(&GraphIssue::EmptyName));
                assert!(issues.contains(&GraphIssue::EmptyPropertyPath));
                assert!(issues.contains(&GraphIssue::EmptyTransitionName));
                assert!(issues.contains(&GraphIssue::DuplicateTransition {
                    name: "go".to_string()
                }));
                assert!(issues.contains(&GraphIssue::UnknownCallbackTransition {
                    phase: CallbackPhase::Guard,
                    handler: "check".to_string(),
                    transition: "missing".to_string(),
                }));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_transition_states_are_allowed() {
        let graph = GraphBuilder::<()>::new()
            .states(["A"])
            .transition("go", ["A"], ["Nowhere"])
            .build();

        assert!(graph.is_ok());
    }

    #[test]
    fn error_message_lists_issues() {
        let err = GraphBuilder::<()>::new()
            .name("broken")
            .property_path("")
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Graph 'broken' is invalid: property path is empty"
        );
    }
}
