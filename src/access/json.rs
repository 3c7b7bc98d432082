//! Accessor for entities stored as JSON documents.

use crate::access::error::AccessError;
use crate::access::PropertyAccessor;
use crate::core::StateSet;
use serde_json::Value;

/// Reads and writes the state field of a `serde_json::Value`.
///
/// Paths are dot-separated object keys (`"order.state"`); numeric segments
/// index into arrays. The field may hold an array of strings, a single
/// string (a one-state set) or `null` (the empty set). Writes always store a
/// sorted array of strings and require the field to exist already.
///
/// # Example
///
/// ```rust
/// use multistate::access::{JsonAccessor, PropertyAccessor};
/// use serde_json::json;
///
/// let mut doc = json!({ "order": { "state": "checkout" } });
///
/// let states = JsonAccessor.read(&doc, "order.state").unwrap();
/// assert!(states.contains("checkout"));
///
/// let next = ["paid", "packing"].into_iter().collect();
/// JsonAccessor.write(&mut doc, "order.state", next).unwrap();
/// assert_eq!(doc["order"]["state"], json!(["packing", "paid"]));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonAccessor;

/// Translate `a.b.c` into the JSON pointer `/a/b/c`.
fn pointer(path: &str) -> Result<String, AccessError> {
    if path.is_empty() || path.split('.').any(str::is_empty) {
        return Err(AccessError::PathNotFound {
            path: path.to_string(),
        });
    }

    Ok(path
        .split('.')
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect())
}

fn malformed(path: &str, reason: impl Into<String>) -> AccessError {
    AccessError::Malformed {
        path: path.to_string(),
        reason: reason.into(),
    }
}

impl PropertyAccessor<Value> for JsonAccessor {
    fn read(&self, entity: &Value, path: &str) -> Result<StateSet, AccessError> {
        let value = entity
            .pointer(&pointer(path)?)
            .ok_or_else(|| AccessError::PathNotFound {
                path: path.to_string(),
            })?;

        match value {
            Value::Null => Ok(StateSet::new()),
            Value::String(state) => Ok(std::iter::once(state.as_str()).collect()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| malformed(path, format!("non-string member {item}")))
                })
                .collect(),
            other => Err(malformed(path, format!("unexpected value {other}"))),
        }
    }

    fn write(&self, entity: &mut Value, path: &str, states: StateSet) -> Result<(), AccessError> {
        let slot = entity
            .pointer_mut(&pointer(path)?)
            .ok_or_else(|| AccessError::PathNotFound {
                path: path.to_string(),
            })?;

        *slot = Value::Array(states.into_iter().map(Value::String).collect());
        Ok(())
    }
}
