//! Built-in Kubernetes resource handlers.
//!
//! Namespaced kinds share a sharded core agent; cluster-scoped kinds share a
//! singleton agent built on the first shard. [`builtin_registry`] assembles a
//! [`HandlerRegistry`] for an account from its configured kind list.

pub mod cluster_scoped;
pub mod kinds;
pub mod namespaced;

pub use self::cluster_scoped::{ClusterScopedCachingAgent, ClusterScopedHandler};
pub use self::namespaced::{CoreCachingAgent, CoreKindHandler};

use crate::domain::error::{HandlerError, HandlerResult};
use crate::domain::models::HandlerRegistry;

/// Build a registry with one handler per requested built-in kind.
///
/// An empty `requested` list registers every built-in kind, namespaced kinds
/// first.
///
/// # Errors
///
/// Returns `Err` if a requested kind is not a built-in kind.
pub fn builtin_registry(requested: &[String]) -> HandlerResult<HandlerRegistry> {
    let mut registry = HandlerRegistry::new();

    if requested.is_empty() {
        for kind in kinds::NAMESPACED_KINDS {
            registry.register(Box::new(CoreKindHandler::new(*kind)));
        }
        for kind in kinds::CLUSTER_SCOPED_KINDS {
            registry.register(Box::new(ClusterScopedHandler::new(*kind)));
        }
        return Ok(registry);
    }

    for requested_kind in requested {
        let kind = kinds::canonical(requested_kind).ok_or_else(|| {
            HandlerError::InvalidConfiguration {
                kind: requested_kind.clone(),
                reason: "not a built-in Kubernetes kind".to_string(),
            }
        })?;

        if kinds::is_cluster_scoped(kind) {
            registry.register(Box::new(ClusterScopedHandler::new(kind)));
        } else {
            registry.register(Box::new(CoreKindHandler::new(kind)));
        }
    }

    Ok(registry)
}
