//! Singleton caching agent for cluster-scoped kinds.
//!
//! Cluster-scoped resources cannot be partitioned by namespace, so the
//! handler only builds an agent on the first shard of the sweep and declines
//! every other shard.

use crate::adapters::kubernetes::kinds;
use crate::adapters::kubernetes::namespaced::kubeconfig_context;
use crate::domain::error::HandlerResult;
use crate::domain::models::{agent_type_for, ShardSpec};
use crate::domain::ports::{
    CachingAgent, ResourceHandler, ShardContext, DEFAULT_POLL_INTERVAL_MS,
};

pub const CLUSTER_SCOPED_AGENT_NAME: &str = "KubernetesClusterScopedCachingAgent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterScopedCachingAgent {
    agent_type: String,
    account: String,
    context: Option<String>,
    poll_interval_ms: u64,
    kinds: Vec<String>,
}

impl CachingAgent for ClusterScopedCachingAgent {
    fn agent_type(&self) -> &str {
        &self.agent_type
    }

    fn account_name(&self) -> &str {
        &self.account
    }

    fn shard(&self) -> ShardSpec {
        ShardSpec::singleton()
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }

    fn kinds(&self) -> &[String] {
        &self.kinds
    }

    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// Handler for one cluster-scoped kind.
#[derive(Debug, Clone)]
pub struct ClusterScopedHandler {
    kind: String,
}

impl ClusterScopedHandler {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl ResourceHandler for ClusterScopedHandler {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn build_caching_agent(
        &self,
        ctx: &ShardContext<'_>,
    ) -> HandlerResult<Option<Box<dyn CachingAgent>>> {
        if !ctx.is_first_shard() || !ctx.config.caches_kind(&self.kind) {
            return Ok(None);
        }
        let context = kubeconfig_context(ctx)?;

        let kinds = ctx
            .account
            .registry()
            .kinds()
            .into_iter()
            .filter(|k| kinds::is_cluster_scoped(k) && ctx.config.caches_kind(k))
            .map(ToString::to_string)
            .collect();

        Ok(Some(Box::new(ClusterScopedCachingAgent {
            agent_type: agent_type_for(
                &ctx.account.name,
                CLUSTER_SCOPED_AGENT_NAME,
                ShardSpec::singleton(),
            ),
            account: ctx.account.name.clone(),
            context,
            poll_interval_ms: ctx.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            kinds,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AccountContext, CacheConfig, HandlerRegistry, KubernetesCredentials,
    };

    fn ctx<'a>(account: &'a AccountContext, config: &'a CacheConfig, index: u32) -> ShardContext<'a> {
        ShardContext {
            account,
            shard_index: index,
            shard_count: 3,
            poll_interval_ms: Some(5_000),
            config,
        }
    }

    #[test]
    fn test_only_first_shard_builds() {
        let registry = HandlerRegistry::new().with_handler(ClusterScopedHandler::new("namespace"));
        let account = AccountContext::new("prod", KubernetesCredentials::new(registry));
        let config = CacheConfig::default();
        let handler = ClusterScopedHandler::new("namespace");

        let agent = handler.build_caching_agent(&ctx(&account, &config, 0)).unwrap().unwrap();
        assert_eq!(agent.agent_type(), "prod/KubernetesClusterScopedCachingAgent[1/1]");
        assert_eq!(agent.poll_interval_ms(), 5_000);
        assert_eq!(agent.shard(), ShardSpec::singleton());

        for index in 1..3 {
            assert!(handler.build_caching_agent(&ctx(&account, &config, index)).unwrap().is_none());
        }
    }

    #[test]
    fn test_kinds_limited_to_cluster_scope() {
        let registry = HandlerRegistry::new()
            .with_handler(ClusterScopedHandler::new("namespace"))
            .with_handler(ClusterScopedHandler::new("storageClass"))
            .with_handler(crate::adapters::kubernetes::CoreKindHandler::new("pod"));
        let account = AccountContext::new("prod", KubernetesCredentials::new(registry));
        let config = CacheConfig::default();

        let agent = ClusterScopedHandler::new("namespace")
            .build_caching_agent(&ctx(&account, &config, 0))
            .unwrap()
            .unwrap();

        assert_eq!(agent.kinds(), ["namespace", "storageClass"]);
        assert!(agent.namespaces().is_empty());
    }
}
