//! Turning configured callback specs into invokable handlers.
//!
//! Graphs loaded from configuration only carry [`CallbackSpec`]s. A machine
//! resolves them lazily, when a phase they belong to runs, through a
//! [`CallbackResolver`]. Without a resolver the [`IdentityResolver`] is used,
//! which accepts live handlers as they are and cannot resolve named specs.

mod registry;

pub use registry::CallbackRegistry;

use crate::core::{Callback, CallbackSpec};
use crate::machine::{MachineError, MachineResult};
use std::sync::Arc;

/// Resolves a named callback spec into a handler.
pub trait CallbackResolver<E>: Send + Sync {
    fn resolve(&self, spec: &CallbackSpec) -> MachineResult<Arc<dyn Callback<E>>>;
}

/// The default resolver.
///
/// Live handlers never reach a resolver, so every spec it is asked about is
/// unresolvable.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityResolver;

impl<E> CallbackResolver<E> for IdentityResolver {
    fn resolve(&self, spec: &CallbackSpec) -> MachineResult<Arc<dyn Callback<E>>> {
        Err(MachineError::CallbackResolution {
            handler: spec.handler.clone(),
            reason: "no callback resolver configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_resolver_rejects_named_specs() {
        let result: MachineResult<Arc<dyn Callback<()>>> =
            IdentityResolver.resolve(&CallbackSpec::new("send_mail"));

        match result {
            Err(MachineError::CallbackResolution { handler, .. }) => {
                assert_eq!(handler, "send_mail")
            }
            _ => panic!("Expected CallbackResolution error"),
        }
    }
}
