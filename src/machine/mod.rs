//! The machine: one entity bound to one graph.
//!
//! A [`Machine`] holds no state of its own apart from the handlers its
//! resolver produced. Every call re-reads the entity's state-set through the
//! property accessor:
//! - `can` evaluates availability (see `evaluator.rs`)
//! - `apply` runs notifications, callbacks and the mutation
//! - `set_state` commits `(current - from) ∪ to` (see `mutator.rs`)

mod cache;
pub mod error;
mod evaluator;
mod mutator;

pub use error::{MachineError, MachineResult};

pub(crate) use cache::CallbackCache;

use crate::access::{AccessError, PropertyAccessor};
use crate::builder::MachineBuilder;
use crate::core::StateSet;
use crate::events::EventNotifier;
use crate::graph::Graph;
use crate::resolve::CallbackResolver;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Binds a caller-owned entity to a graph.
///
/// The machine borrows the entity mutably for its whole lifetime, so within
/// one process no other code can change the state field between the read and
/// the write of an `apply`. Across processes, atomicity is up to the
/// accessor.
pub struct Machine<'e, E> {
    entity: &'e mut E,
    graph: Arc<Graph<E>>,
    accessor: Arc<dyn PropertyAccessor<E>>,
    notifier: Option<Arc<dyn EventNotifier<E>>>,
    resolver: Option<Arc<dyn CallbackResolver<E>>>,
    callbacks: Arc<CallbackCache<E>>,
}

impl<'e, E> Machine<'e, E> {
    /// Bind `entity` to `graph`.
    ///
    /// Fails with [`MachineError::InvalidEntityBinding`] if the graph's
    /// property path cannot be read on the entity.
    pub fn new(
        entity: &'e mut E,
        graph: Arc<Graph<E>>,
        accessor: Arc<dyn PropertyAccessor<E>>,
        notifier: Option<Arc<dyn EventNotifier<E>>>,
        resolver: Option<Arc<dyn CallbackResolver<E>>>,
    ) -> MachineResult<Self> {
        let callbacks = Arc::new(CallbackCache::new(&graph));
        Self::bind(entity, graph, accessor, notifier, resolver, callbacks)
    }

    /// Bind with a resolved-callback cache shared with other machines of the
    /// same graph and resolver.
    pub(crate) fn bind(
        entity: &'e mut E,
        graph: Arc<Graph<E>>,
        accessor: Arc<dyn PropertyAccessor<E>>,
        notifier: Option<Arc<dyn EventNotifier<E>>>,
        resolver: Option<Arc<dyn CallbackResolver<E>>>,
        callbacks: Arc<CallbackCache<E>>,
    ) -> MachineResult<Self> {
        let states = accessor
            .read(&*entity, graph.property_path())
            .map_err(|source| MachineError::InvalidEntityBinding {
                entity: entity_name::<E>(),
                graph: graph.name().to_string(),
                source,
            })?;

        debug!(
            graph = graph.name(),
            property_path = graph.property_path(),
            states = %states,
            "machine_bound"
        );

        Ok(Self {
            entity,
            graph,
            accessor,
            notifier,
            resolver,
            callbacks,
        })
    }

    pub fn builder() -> MachineBuilder<E> {
        MachineBuilder::new()
    }

    /// The entity's current state-set.
    pub fn get_state(&self) -> MachineResult<StateSet> {
        self.accessor
            .read(&*self.entity, self.graph.property_path())
            .map_err(|source| self.access_failure(source))
    }

    /// Whether `state` is currently one of the entity's states.
    pub fn is_in(&self, state: &str) -> MachineResult<bool> {
        Ok(self.get_state()?.contains(state))
    }

    pub fn get_graph_name(&self) -> &str {
        self.graph.name()
    }

    pub fn get_entity(&self) -> &E {
        &*self.entity
    }

    pub fn graph(&self) -> &Graph<E> {
        &self.graph
    }

    /// Every transition `can` currently allows, in declaration order.
    pub fn get_possible_transitions(&self) -> MachineResult<Vec<String>> {
        let mut possible = Vec::new();
        for name in self.graph.transition_names() {
            if self.can(name)? {
                possible.push(name.to_string());
            }
        }
        Ok(possible)
    }

    pub(crate) fn access_failure(&self, source: AccessError) -> MachineError {
        MachineError::PropertyAccessFailure {
            entity: entity_name::<E>(),
            graph: self.graph.name().to_string(),
            source,
        }
    }
}

impl<E> fmt::Debug for Machine<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("entity", &entity_name::<E>())
            .field("graph", &self.graph.name())
            .field("notifier", &self.notifier.is_some())
            .field("resolver", &self.resolver.is_some())
            .field("resolved_callbacks", &self.callbacks.resolved())
            .finish()
    }
}

pub(crate) fn entity_name<E>() -> String {
    std::any::type_name::<E>().to_string()
}
