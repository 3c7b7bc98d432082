//! A name-to-closure callback registry.

use crate::core::{Callback, CallbackSpec};
use crate::events::TransitionEvent;
use crate::machine::{MachineError, MachineResult};
use crate::resolve::CallbackResolver;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A handler that also receives the `args` configured next to its name.
trait ArgsCallback<E>: Send + Sync {
    fn call_with(&self, event: &TransitionEvent<'_, E>, args: &[Value]) -> bool;
}

impl<E, F> ArgsCallback<E> for F
where
    F: Fn(&TransitionEvent<'_, E>, &[Value]) -> bool + Send + Sync,
{
    fn call_with(&self, event: &TransitionEvent<'_, E>, args: &[Value]) -> bool {
        self(event, args)
    }
}

/// An args-taking handler bound to the args of one spec.
struct Bound<E> {
    handler: Arc<dyn ArgsCallback<E>>,
    args: Vec<Value>,
}

impl<E> Callback<E> for Bound<E> {
    fn call(&self, event: &TransitionEvent<'_, E>) -> bool {
        self.handler.call_with(event, &self.args)
    }
}

enum Entry<E> {
    Plain(Arc<dyn Callback<E>>),
    WithArgs(Arc<dyn ArgsCallback<E>>),
}

/// Resolves callback specs by their `do` name.
///
/// # Example
///
/// ```rust
/// use multistate::core::CallbackSpec;
/// use multistate::resolve::{CallbackRegistry, CallbackResolver};
///
/// struct Parcel {
///     weight: u32,
/// }
///
/// let registry = CallbackRegistry::<Parcel>::new()
///     .register("always", |_| true)
///     .register_with_args("lighter_than", |event, args| {
///         let limit = args.first().and_then(|v| v.as_u64()).unwrap_or(0);
///         u64::from(event.entity().weight) < limit
///     });
///
/// assert!(registry.resolve(&CallbackSpec::new("always")).is_ok());
/// assert!(registry.resolve(&CallbackSpec::new("missing")).is_err());
/// ```
pub struct CallbackRegistry<E> {
    entries: HashMap<String, Entry<E>>,
}

impl<E> CallbackRegistry<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a handler under `name`. Configured `args` are ignored.
    pub fn register<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Entry::Plain(Arc::new(handler)));
        self
    }

    /// Register a handler that receives the spec's `args`.
    pub fn register_with_args<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Entry::WithArgs(Arc::new(handler)));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for CallbackRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for CallbackRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("CallbackRegistry")
            .field("handlers", &names)
            .finish()
    }
}

impl<E: 'static> CallbackResolver<E> for CallbackRegistry<E> {
    fn resolve(&self, spec: &CallbackSpec) -> MachineResult<Arc<dyn Callback<E>>> {
        match self.entries.get(&spec.handler) {
            Some(Entry::Plain(handler)) => Ok(Arc::clone(handler)),
            Some(Entry::WithArgs(handler)) => Ok(Arc::new(Bound {
                handler: Arc::clone(handler),
                args: spec.args.clone(),
            })),
            None => Err(MachineError::CallbackResolution {
                handler: spec.handler.clone(),
                reason: "no handler registered under this name".to_string(),
            }),
        }
    }
}
