//! Callback registrations for the guard, before and after phases.
//!
//! A callback is anything invokable with a [`TransitionEvent`] that answers
//! with a boolean. Graphs loaded from configuration only know callbacks by
//! name ([`CallbackSpec`]); graphs built in code can register live closures
//! directly. [`CallbackHandler`] holds either form until the machine resolves
//! it.

use crate::core::state::StateSet;
use crate::events::TransitionEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The phase a callback is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackPhase {
    /// Evaluated by `can`, once per matching branch state. Can veto.
    Guard,
    /// Runs in `apply` before the state-set is written.
    Before,
    /// Runs in `apply` after the state-set is written.
    After,
}

impl CallbackPhase {
    pub const ALL: [CallbackPhase; 3] = [Self::Guard, Self::Before, Self::After];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guard => "guard",
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for CallbackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something invokable with a transition event.
///
/// Any `Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync` closure is a
/// callback.
///
/// # Example
///
/// ```rust
/// use multistate::core::Callback;
/// use multistate::events::TransitionEvent;
/// use std::sync::Arc;
///
/// struct Ticket {
///     paid: bool,
/// }
///
/// struct IsPaid;
///
/// impl Callback<Ticket> for IsPaid {
///     fn call(&self, event: &TransitionEvent<'_, Ticket>) -> bool {
///         event.entity().paid
///     }
/// }
///
/// let _boxed: Arc<dyn Callback<Ticket>> = Arc::new(IsPaid);
/// ```
pub trait Callback<E>: Send + Sync {
    fn call(&self, event: &TransitionEvent<'_, E>) -> bool;
}

impl<E, F> Callback<E> for F
where
    F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync,
{
    fn call(&self, event: &TransitionEvent<'_, E>) -> bool {
        self(event)
    }
}

/// A callback known only by name, as written in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallbackSpec {
    /// Name the resolver looks the handler up by.
    #[serde(rename = "do")]
    pub handler: String,

    /// Extra arguments handed to the resolver.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<serde_json::Value>,
}

impl CallbackSpec {
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<serde_json::Value>) -> Self {
        self.args = args;
        self
    }
}

/// Either an unresolved spec or a live handler.
pub enum CallbackHandler<E> {
    Spec(CallbackSpec),
    Live(Arc<dyn Callback<E>>),
}

impl<E> CallbackHandler<E> {
    /// Short label for logs and error messages.
    pub fn label(&self) -> &str {
        match self {
            Self::Spec(spec) => &spec.handler,
            Self::Live(_) => "<live>",
        }
    }
}

impl<E> Clone for CallbackHandler<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Spec(spec) => Self::Spec(spec.clone()),
            Self::Live(handler) => Self::Live(Arc::clone(handler)),
        }
    }
}

impl<E> fmt::Debug for CallbackHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
            Self::Live(_) => f.write_str("Live(..)"),
        }
    }
}

/// Restricts which transitions a callback participates in.
///
/// Empty lists match everything.
/// - `on` matches the transition name.
/// - `from` matches the branch state of a guard evaluation, or any consumed
///   state present on the entity for `before`/`after` callbacks.
/// - `to` matches if the transition produces any of the listed states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on: Vec<String>,

    #[serde(default, skip_serializing_if = "StateSet::is_empty")]
    pub from: StateSet,

    #[serde(default, skip_serializing_if = "StateSet::is_empty")]
    pub to: StateSet,
}

impl CallbackFilter {
    /// A filter that matches every transition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only run for the named transition. May be called repeatedly.
    pub fn on(mut self, transition: impl Into<String>) -> Self {
        self.on.push(transition.into());
        self
    }

    /// Only run when leaving `state`. May be called repeatedly.
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from.insert(state);
        self
    }

    /// Only run when `state` is produced. May be called repeatedly.
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to.insert(state);
        self
    }

    pub fn matches<E>(&self, event: &TransitionEvent<'_, E>) -> bool {
        if !self.on.is_empty() && !self.on.iter().any(|t| t == event.transition_name()) {
            return false;
        }

        if !self.from.is_empty() {
            let leaving = match event.branch_state() {
                Some(state) => self.from.contains(state),
                None => event
                    .from()
                    .iter()
                    .any(|s| event.states().contains(s) && self.from.contains(s)),
            };
            if !leaving {
                return false;
            }
        }

        self.to.is_empty() || self.to.intersects(event.to())
    }
}

/// A callback registered for a phase, with its filter.
pub struct CallbackRegistration<E> {
    pub filter: CallbackFilter,
    pub handler: CallbackHandler<E>,
}

impl<E> Clone for CallbackRegistration<E> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<E> fmt::Debug for CallbackRegistration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistration")
            .field("filter", &self.filter)
            .field("handler", &self.handler)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_round_trips_through_lowercase_names() {
        for phase in CallbackPhase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.as_str()));
            let back: CallbackPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(back, phase);
        }
    }

    #[test]
    fn spec_reads_do_key_and_optional_args() {
        let spec: CallbackSpec = serde_json::from_str(r#"{"do": "notify"}"#).unwrap();
        assert_eq!(spec, CallbackSpec::new("notify"));

        let spec: CallbackSpec =
            serde_json::from_str(r#"{"do": "notify", "args": ["ops", 3]}"#).unwrap();
        assert_eq!(spec.args.len(), 2);
    }

    #[test]
    fn filter_builder_accumulates() {
        let filter = CallbackFilter::new()
            .on("submit")
            .on("approve")
            .from("draft")
            .to("review");

        assert_eq!(filter.on, vec!["submit".to_string(), "approve".to_string()]);
        assert!(filter.from.contains("draft"));
        assert!(filter.to.contains("review"));
    }

    fn always(_: &TransitionEvent<'_, ()>) -> bool {
        true
    }

    #[test]
    fn handler_labels() {
        let spec: CallbackHandler<()> = CallbackHandler::Spec(CallbackSpec::new("audit"));
        assert_eq!(spec.label(), "audit");

        let live: CallbackHandler<()> = CallbackHandler::Live(Arc::new(always));
        assert_eq!(live.label(), "<live>");
        assert_eq!(format!("{live:?}"), "Live(..)");
    }
}
