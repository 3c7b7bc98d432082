//! Builder for binding machines.

use crate::access::PropertyAccessor;
use crate::builder::error::BuildError;
use crate::events::EventNotifier;
use crate::graph::Graph;
use crate::machine::{CallbackCache, Machine, MachineResult};
use crate::resolve::CallbackResolver;
use std::sync::{Arc, OnceLock};

/// Builder for binding an entity to a graph with a fluent API.
///
/// The builder holds no entity, so one configured builder can bind many
/// entities in turn. Machines from the same builder share the handlers
/// their resolver produced, so each named callback is resolved once.
pub struct MachineBuilder<E> {
    graph: Option<Arc<Graph<E>>>,
    accessor: Option<Arc<dyn PropertyAccessor<E>>>,
    notifier: Option<Arc<dyn EventNotifier<E>>>,
    resolver: Option<Arc<dyn CallbackResolver<E>>>,
    callbacks: OnceLock<Arc<CallbackCache<E>>>,
}

impl<E> MachineBuilder<E> {
    pub fn new() -> Self {
        Self {
            graph: None,
            accessor: None,
            notifier: None,
            resolver: None,
            callbacks: OnceLock::new(),
        }
    }

    /// Set the graph (required).
    pub fn graph(mut self, graph: impl Into<Arc<Graph<E>>>) -> Self {
        self.graph = Some(graph.into());
        self.callbacks = OnceLock::new();
        self
    }

    /// Set the property accessor (required).
    pub fn accessor(mut self, accessor: Arc<dyn PropertyAccessor<E>>) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Set the event notifier (optional).
    pub fn notifier(mut self, notifier: Arc<dyn EventNotifier<E>>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the callback resolver (optional).
    pub fn resolver(mut self, resolver: Arc<dyn CallbackResolver<E>>) -> Self {
        self.resolver = Some(resolver);
        self.callbacks = OnceLock::new();
        self
    }

    /// Bind `entity`.
    /// Returns an error if required fields are missing or the entity has no
    /// readable state field.
    pub fn build<'e>(&self, entity: &'e mut E) -> MachineResult<Machine<'e, E>> {
        let graph = self.graph.clone().ok_or(BuildError::MissingGraph)?;
        let accessor = self.accessor.clone().ok_or(BuildError::MissingAccessor)?;
        let callbacks = self
            .callbacks
            .get_or_init(|| Arc::new(CallbackCache::new(&graph)));

        Machine::bind(
            entity,
            graph,
            accessor,
            self.notifier.clone(),
            self.resolver.clone(),
            Arc::clone(callbacks),
        )
    }
}

impl<E> Default for MachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::JsonAccessor;
    use crate::builder::GraphBuilder;
    use crate::machine::MachineError;
    use crate::state_set;
    use serde_json::{json, Value};

    fn graph() -> Graph<Value> {
        GraphBuilder::new()
            .states(["A", "B"])
            .transition("go", ["A"], ["B"])
            .build()
            .unwrap()
    }

    #[test]
    fn builder_validates_required_fields() {
        let mut entity = json!({ "state": ["A"] });

        let result = MachineBuilder::<Value>::new().build(&mut entity);
        assert!(matches!(
            result,
            Err(MachineError::Build(BuildError::MissingGraph))
        ));

        let result = MachineBuilder::new().graph(graph()).build(&mut entity);
        assert!(matches!(
            result,
            Err(MachineError::Build(BuildError::MissingAccessor))
        ));
    }

    #[test]
    fn one_builder_binds_many_entities() {
        let builder = MachineBuilder::new()
            .graph(graph())
            .accessor(Arc::new(JsonAccessor));

        let mut first = json!({ "state": ["A"] });
        let mut second = json!({ "state": ["B"] });

        assert!(builder.build(&mut first).unwrap().apply("go", false).unwrap());
        assert!(!builder.build(&mut second).unwrap().can("go").unwrap());

        assert_eq!(first["state"], json!(["B"]));
        assert_eq!(second["state"], json!(["B"]));
    }

    #[test]
    fn binding_checks_property_path() {
        let builder = Machine::builder()
            .graph(graph())
            .accessor(Arc::new(JsonAccessor));
        let mut entity = json!({ "status": ["A"] });

        let err = builder.build(&mut entity).unwrap_err();
        assert!(matches!(err, MachineError::InvalidEntityBinding { .. }));

        let mut empty = json!({ "state": [] });
        let machine = builder.build(&mut empty).unwrap();
        assert_eq!(machine.get_state().unwrap(), state_set![]);
    }
}
