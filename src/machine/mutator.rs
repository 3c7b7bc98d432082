//! Committing a new state-set.

use crate::core::StateSet;
use crate::machine::{entity_name, Machine, MachineError, MachineResult};
use tracing::debug;

impl<'e, E> Machine<'e, E> {
    /// Replace `from` with `to` in the entity's state-set.
    ///
    /// Every state in `to` must be declared by the graph; `from` is not
    /// checked, it only has to match what is already on the entity. The
    /// whole field is written once with `(current - from) ∪ to`.
    ///
    /// Nothing is written when validation fails.
    pub fn set_state(&mut self, to: &StateSet, from: &StateSet) -> MachineResult<()> {
        if let Some(state) = to.iter().find(|s| !self.graph.is_valid_state(s)) {
            return Err(MachineError::UndeclaredState {
                state: state.clone(),
                entity: entity_name::<E>(),
                graph: self.graph.name().to_string(),
            });
        }

        let current = self.get_state()?;
        let next = current.replace(from, to);

        debug!(
            graph = self.graph.name(),
            from = %current,
            to = %next,
            "state_set_written"
        );

        let path = self.graph.property_path();
        self.accessor
            .write(&mut *self.entity, path, next)
            .map_err(|source| MachineError::PropertyAccessFailure {
                entity: entity_name::<E>(),
                graph: self.graph.name().to_string(),
                source,
            })
    }
}
