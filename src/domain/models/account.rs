//! Account context handed to the dispatcher.

use crate::domain::models::config::AccountConfig;
use crate::domain::models::registry::HandlerRegistry;

/// Credentials and resource scope for one Kubernetes account.
#[derive(Debug, Default)]
pub struct KubernetesCredentials {
    /// Kubeconfig context, `None` for the current context
    pub context: Option<String>,
    /// Namespaces to cache (empty means all namespaces)
    pub namespaces: Vec<String>,
    /// Namespaces never cached
    pub omit_namespaces: Vec<String>,
    /// Handlers for the resource kinds this account caches
    pub registry: HandlerRegistry,
}

impl KubernetesCredentials {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    /// Configured namespaces minus omitted ones, in configured order.
    pub fn cacheable_namespaces(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .filter(|ns| !self.omit_namespaces.contains(ns))
            .cloned()
            .collect()
    }
}

/// Immutable input to a single dispatch.
#[derive(Debug)]
pub struct AccountContext {
    pub name: String,
    pub credentials: KubernetesCredentials,
    /// Per-account poll interval override, in seconds
    pub cache_interval_seconds: Option<u64>,
    /// Shard count; zero yields no agents
    pub cache_threads: u32,
}

impl AccountContext {
    pub fn new(name: impl Into<String>, credentials: KubernetesCredentials) -> Self {
        Self {
            name: name.into(),
            credentials,
            cache_interval_seconds: None,
            cache_threads: 1,
        }
    }

    /// Build a context from account configuration and a populated registry.
    pub fn from_config(config: &AccountConfig, registry: HandlerRegistry) -> Self {
        Self {
            name: config.name.clone(),
            credentials: KubernetesCredentials {
                context: config.context.clone(),
                namespaces: config.namespaces.clone(),
                omit_namespaces: config.omit_namespaces.clone(),
                registry,
            },
            cache_interval_seconds: config.cache_interval_seconds,
            cache_threads: config.cache_threads,
        }
    }

    #[must_use]
    pub fn with_cache_threads(mut self, threads: u32) -> Self {
        self.cache_threads = threads;
        self
    }

    #[must_use]
    pub fn with_cache_interval_seconds(mut self, seconds: u64) -> Self {
        self.cache_interval_seconds = Some(seconds);
        self
    }

    pub const fn registry(&self) -> &HandlerRegistry {
        &self.credentials.registry
    }

    /// Poll interval override converted to milliseconds.
    pub fn poll_interval_override_ms(&self) -> Option<u64> {
        self.cache_interval_seconds.map(|secs| secs.saturating_mul(1_000))
    }
}
