//! Multistate: a transition engine for entities in several states at once
//!
//! A [`Graph`] declares states and named transitions. Each transition
//! consumes a set of states and produces another. An entity's current state
//! is a [`StateSet`] stored on the entity itself; a [`Machine`] binds one
//! entity to one graph and answers two questions:
//!
//! - [`Machine::can`]: may this transition be applied now?
//! - [`Machine::apply`]: apply it, running listeners and callbacks around
//!   the mutation
//!
//! Transitions consuming more than one state are joins: they wait until the
//! entity holds every consumed state and every branch passes its guards.
//!
//! # Core Concepts
//!
//! - **Graph**: immutable, validated once, shared between machines
//! - **Callbacks**: guards decide availability, before/after callbacks wrap
//!   the mutation; named callbacks are resolved by a [`CallbackResolver`]
//! - **Events**: test, pre- and post-transition signals go to an
//!   [`EventNotifier`]; listeners may veto the first two
//! - **Accessors**: a [`PropertyAccessor`] reads and writes the state field
//!
//! # Example
//!
//! ```rust
//! use multistate::access::JsonAccessor;
//! use multistate::{state_set, GraphBuilder, Machine};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let graph = GraphBuilder::new()
//!     .name("order")
//!     .states(["placed", "picking", "invoicing", "ready", "shipped"])
//!     .transition("start", ["placed"], ["picking", "invoicing"])
//!     .transition("pick", ["picking"], ["ready"])
//!     .transition("invoice", ["invoicing"], ["ready"])
//!     .transition("ship", ["ready"], ["shipped"])
//!     .build()
//!     .unwrap();
//!
//! let mut order = json!({ "state": ["placed"] });
//! let mut machine = Machine::builder()
//!     .graph(graph)
//!     .accessor(Arc::new(JsonAccessor))
//!     .build(&mut order)
//!     .unwrap();
//!
//! machine.apply("start", false).unwrap();
//! assert_eq!(machine.get_state().unwrap(), state_set!["picking", "invoicing"]);
//!
//! machine.apply("pick", false).unwrap();
//! assert_eq!(machine.get_possible_transitions().unwrap(), vec!["invoice", "ship"]);
//! ```

pub mod access;
pub mod builder;
pub mod core;
pub mod events;
pub mod graph;
pub mod machine;
pub mod resolve;

// Re-export commonly used types
pub use access::{AccessError, PropertyAccessor};
pub use builder::{BuildError, GraphBuilder, MachineBuilder};
pub use core::{CallbackFilter, CallbackPhase, CallbackSpec, StateHistory, StateSet};
pub use events::{EventDispatcher, EventNotifier, HistoryRecorder, Signal, TransitionEvent};
pub use graph::{Graph, GraphConfig, GraphError};
pub use machine::{Machine, MachineError, MachineResult};
pub use resolve::{CallbackRegistry, CallbackResolver};
