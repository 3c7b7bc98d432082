//! Serializable graph configuration.
//!
//! A graph is usually described in JSON:
//!
//! ```json
//! {
//!   "name": "order",
//!   "property_path": "state",
//!   "states": ["checkout", "paid", "packed", "shipped"],
//!   "transitions": {
//!     "pay":  { "from": ["checkout"], "to": ["paid"] },
//!     "ship": { "from": ["paid", "packed"], "to": ["shipped"] }
//!   },
//!   "callbacks": {
//!     "guard": [{ "on": ["pay"], "do": "has_items" }],
//!     "after": [{ "to": ["shipped"], "do": "notify", "args": ["customer"] }]
//!   }
//! }
//! ```
//!
//! Transitions keep their declaration order, which is the order
//! `Machine::get_possible_transitions` reports them in.

use crate::core::{CallbackFilter, CallbackSpec, StateSet};
use crate::graph::error::GraphError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GRAPH_NAME: &str = "default";
pub const DEFAULT_PROPERTY_PATH: &str = "state";

fn default_name() -> String {
    DEFAULT_GRAPH_NAME.to_string()
}

/// Root configuration for a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Where the state-set lives on the entity. `None` means `"state"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_path: Option<String>,

    #[serde(default)]
    pub states: Vec<String>,

    #[serde(default, with = "ordered_transitions")]
    pub transitions: Vec<TransitionConfig>,

    #[serde(default)]
    pub callbacks: CallbacksConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            property_path: None,
            states: Vec::new(),
            transitions: Vec::new(),
            callbacks: CallbacksConfig::default(),
        }
    }
}

impl GraphConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from an already-decoded JSON value.
    ///
    /// Unless `serde_json` is built with `preserve_order`, object keys in a
    /// `Value` are sorted, so transition declaration order is lost. Prefer
    /// [`GraphConfig::from_json_str`] when order matters.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, GraphError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A named transition as declared in configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub name: String,
    pub from: StateSet,
    pub to: StateSet,
}

/// Callback registrations, per phase, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbacksConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guard: Vec<CallbackConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<CallbackConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<CallbackConfig>,
}

/// One callback entry: filter keys next to the `do`/`args` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackConfig {
    #[serde(flatten)]
    pub filter: CallbackFilter,

    #[serde(flatten)]
    pub spec: CallbackSpec,
}

/// (De)serializes `Vec<TransitionConfig>` as a JSON object keyed by name,
/// keeping document order and rejecting duplicate names.
mod ordered_transitions {
    use super::TransitionConfig;
    use crate::core::StateSet;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashSet;
    use std::fmt;

    #[derive(Serialize, Deserialize)]
    struct Body {
        #[serde(default)]
        from: StateSet,
        #[serde(default)]
        to: StateSet,
    }

    pub fn serialize<S>(transitions: &[TransitionConfig], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(transitions.len()))?;
        for t in transitions {
            let body = Body {
                from: t.from.clone(),
                to: t.to.clone(),
            };
            map.serialize_entry(&t.name, &body)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<TransitionConfig>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TransitionsVisitor)
    }

    struct TransitionsVisitor;

    impl<'de> Visitor<'de> for TransitionsVisitor {
        type Value = Vec<TransitionConfig>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of transition names to {from, to}")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut seen = HashSet::new();
            let mut transitions = Vec::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((name, body)) = access.next_entry::<String, Body>()? {
                if !seen.insert(name.clone()) {
                    return Err(de::Error::custom(format!(
                        "duplicate transition '{name}'"
                    )));
                }
                transitions.push(TransitionConfig {
                    name,
                    from: body.from,
                    to: body.to,
                });
            }

            Ok(transitions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_GRAPH: &str = r#"{
        "name": "order",
        "states": ["checkout", "paid", "packed", "shipped"],
        "transitions": {
            "ship": { "from": ["paid", "packed"], "to": ["shipped"] },
            "pay":  { "from": ["checkout"], "to": ["paid"] }
        },
        "callbacks": {
            "guard": [{ "on": ["pay"], "do": "has_items" }],
            "after": [{ "to": ["shipped"], "do": "notify", "args": ["customer"] }]
        }
    }"#;

    #[test]
    fn parses_full_document() {
        let config = GraphConfig::from_json_str(ORDER_GRAPH).unwrap();

        assert_eq!(config.name, "order");
        assert_eq!(config.property_path, None);
        assert_eq!(config.states.len(), 4);
        assert_eq!(config.callbacks.guard.len(), 1);
        assert_eq!(config.callbacks.guard[0].spec.handler, "has_items");
        assert_eq!(config.callbacks.guard[0].filter.on, vec!["pay".to_string()]);
        assert!(config.callbacks.after[0].filter.to.contains("shipped"));
        assert_eq!(config.callbacks.after[0].spec.args.len(), 1);
        assert!(config.callbacks.before.is_empty());
    }

    #[test]
    fn transitions_keep_document_order() {
        let config = GraphConfig::from_json_str(ORDER_GRAPH).unwrap();
        let names: Vec<_> = config.transitions.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["ship", "pay"]);
        assert_eq!(config.transitions[0].from.len(), 2);
    }

    #[test]
    fn missing_sections_default() {
        let config = GraphConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
        assert_eq!(config.name, DEFAULT_GRAPH_NAME);
    }

    #[test]
    fn duplicate_transition_names_are_rejected() {
        let json = r#"{
            "transitions": {
                "go": { "from": ["A"], "to": ["B"] },
                "go": { "from": ["B"], "to": ["C"] }
            }
        }"#;

        let err = GraphConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, GraphError::Parse(_)));
        assert!(err.to_string().contains("duplicate transition 'go'"));
    }

    #[test]
    fn round_trips_through_json() {
        let config = GraphConfig::from_json_str(ORDER_GRAPH).unwrap();
        let json = config.to_json_pretty().unwrap();
        let back = GraphConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GraphConfig::from_path("/definitely/not/here.json").unwrap_err();
        match err {
            GraphError::Io { path, .. } => {
                assert_eq!(path, std::path::PathBuf::from("/definitely/not/here.json"))
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
