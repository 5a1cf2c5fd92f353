//! Common test utilities for integration tests
//!
//! Provides fixture handlers and agents shared across dispatch tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kubecache::domain::error::HandlerResult;
use kubecache::{
    AccountContext, CachingAgent, HandlerRegistry, KubernetesCredentials, ResourceHandler,
    ShardContext, ShardSpec,
};

/// How a fixture handler names the agents it builds.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum AgentMode {
    /// `"{kind}-{shard}"`, one identity per shard
    PerShard,
    /// `"{kind}-singleton"` on every shard
    Singleton,
    /// Per-shard identity, but only on shards divisible by `n`
    EveryNth(u32),
    /// Never builds anything
    Decline,
}

#[derive(Debug)]
pub struct FixtureAgent {
    pub agent_type: String,
    pub shard: ShardSpec,
    pub poll_interval_ms: u64,
}

impl CachingAgent for FixtureAgent {
    fn agent_type(&self) -> &str {
        &self.agent_type
    }

    fn account_name(&self) -> &str {
        "fixture"
    }

    fn shard(&self) -> ShardSpec {
        self.shard
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }
}

pub struct FixtureHandler {
    pub kind: String,
    pub mode: AgentMode,
    pub invocations: Arc<AtomicUsize>,
}

impl FixtureHandler {
    pub fn new(kind: &str, mode: AgentMode) -> Self {
        Self {
            kind: kind.to_string(),
            mode,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, readable after the handler moves into a registry.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.invocations)
    }
}

impl ResourceHandler for FixtureHandler {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn build_caching_agent(
        &self,
        ctx: &ShardContext<'_>,
    ) -> HandlerResult<Option<Box<dyn CachingAgent>>> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        let agent_type = match self.mode {
            AgentMode::PerShard => format!("{}-{}", self.kind, ctx.shard_index),
            AgentMode::Singleton => format!("{}-singleton", self.kind),
            AgentMode::EveryNth(n) if n > 0 && ctx.shard_index % n == 0 => {
                format!("{}-{}", self.kind, ctx.shard_index)
            }
            AgentMode::EveryNth(_) | AgentMode::Decline => return Ok(None),
        };

        Ok(Some(Box::new(FixtureAgent {
            agent_type,
            shard: ctx.shard(),
            poll_interval_ms: ctx.poll_interval_ms.unwrap_or(0),
        })))
    }
}

/// Account named `fixture` with the given handlers and shard count.
pub fn account_with(handlers: Vec<FixtureHandler>, threads: u32) -> AccountContext {
    let mut registry = HandlerRegistry::new();
    for handler in handlers {
        registry.register(Box::new(handler));
    }
    AccountContext::new("fixture", KubernetesCredentials::new(registry)).with_cache_threads(threads)
}

#[allow(dead_code)]
pub fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
