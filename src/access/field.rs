//! Accessor for typed entities.

use crate::access::error::AccessError;
use crate::access::PropertyAccessor;
use crate::core::StateSet;
use std::collections::HashMap;
use std::fmt;

type Getter<E> = Box<dyn Fn(&E) -> &StateSet + Send + Sync>;
type Setter<E> = Box<dyn Fn(&mut E) -> &mut StateSet + Send + Sync>;

/// Maps property paths to `StateSet` fields of a Rust type.
///
/// # Example
///
/// ```rust
/// use multistate::access::{FieldAccessor, PropertyAccessor};
/// use multistate::core::StateSet;
///
/// struct Order {
///     state: StateSet,
///     shipping: StateSet,
/// }
///
/// let accessor = FieldAccessor::new()
///     .field("state", |o: &Order| &o.state, |o: &mut Order| &mut o.state)
///     .field("shipping", |o: &Order| &o.shipping, |o: &mut Order| &mut o.shipping);
///
/// let order = Order {
///     state: ["new"].into_iter().collect(),
///     shipping: StateSet::new(),
/// };
/// assert!(accessor.read(&order, "state").unwrap().contains("new"));
/// assert!(accessor.read(&order, "status").is_err());
/// ```
pub struct FieldAccessor<E> {
    fields: HashMap<String, (Getter<E>, Setter<E>)>,
}

impl<E> FieldAccessor<E> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Expose a field under `path`.
    pub fn field<G, S>(mut self, path: impl Into<String>, get: G, set: S) -> Self
    where
        G: Fn(&E) -> &StateSet + Send + Sync + 'static,
        S: Fn(&mut E) -> &mut StateSet + Send + Sync + 'static,
    {
        self.fields
            .insert(path.into(), (Box::new(get), Box::new(set)));
        self
    }

    fn not_found(path: &str) -> AccessError {
        AccessError::PathNotFound {
            path: path.to_string(),
        }
    }
}

impl<E> Default for FieldAccessor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for FieldAccessor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.fields.keys().collect();
        paths.sort();
        f.debug_struct("FieldAccessor").field("paths", &paths).finish()
    }
}

impl<E> PropertyAccessor<E> for FieldAccessor<E> {
    fn read(&self, entity: &E, path: &str) -> Result<StateSet, AccessError> {
        let (get, _) = self.fields.get(path).ok_or_else(|| Self::not_found(path))?;
        Ok(get(entity).clone())
    }

    fn write(&self, entity: &mut E, path: &str, states: StateSet) -> Result<(), AccessError> {
        let (_, set) = self.fields.get(path).ok_or_else(|| Self::not_found(path))?;
        *set(entity) = states;
        Ok(())
    }
}
