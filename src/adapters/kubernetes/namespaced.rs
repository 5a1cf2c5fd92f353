//! Sharded core caching agent for namespaced kinds.
//!
//! Every namespaced kind registers its own [`CoreKindHandler`], but all of
//! them build the same `KubernetesCoreCachingAgent` for a given shard: one
//! agent polls every cacheable namespaced kind in the namespaces its shard
//! owns. Dispatch collapses the per-kind duplicates to one agent per shard.

use crate::adapters::kubernetes::kinds;
use crate::domain::error::{HandlerError, HandlerResult};
use crate::domain::models::{agent_type_for, ShardSpec};
use crate::domain::ports::{
    CachingAgent, ResourceHandler, ShardContext, DEFAULT_POLL_INTERVAL_MS,
};

pub const CORE_AGENT_NAME: &str = "KubernetesCoreCachingAgent";

/// Polls namespaced kinds for one shard of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreCachingAgent {
    agent_type: String,
    account: String,
    context: Option<String>,
    shard: ShardSpec,
    poll_interval_ms: u64,
    kinds: Vec<String>,
    namespaces: Vec<String>,
    omit_namespaces: Vec<String>,
}

impl CachingAgent for CoreCachingAgent {
    fn agent_type(&self) -> &str {
        &self.agent_type
    }

    fn account_name(&self) -> &str {
        &self.account
    }

    fn shard(&self) -> ShardSpec {
        self.shard
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }

    fn kinds(&self) -> &[String] {
        &self.kinds
    }

    /// Empty when the account caches all namespaces; ownership is then
    /// decided per namespace at poll time with [`ShardSpec::owns`].
    fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Only set alongside an empty namespace list. An explicit list already
    /// has omitted namespaces removed.
    fn omit_namespaces(&self) -> &[String] {
        &self.omit_namespaces
    }

    fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// Handler for one namespaced kind.
#[derive(Debug, Clone)]
pub struct CoreKindHandler {
    kind: String,
}

impl CoreKindHandler {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl ResourceHandler for CoreKindHandler {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn build_caching_agent(
        &self,
        ctx: &ShardContext<'_>,
    ) -> HandlerResult<Option<Box<dyn CachingAgent>>> {
        if !ctx.config.caches_kind(&self.kind) {
            return Ok(None);
        }
        let credentials = &ctx.account.credentials;
        let context = kubeconfig_context(ctx)?;

        let shard = ctx.shard();
        let namespaces = shard.owned(&credentials.cacheable_namespaces());
        let omit_namespaces = if credentials.namespaces.is_empty() {
            credentials.omit_namespaces.clone()
        } else if namespaces.is_empty() {
            // Explicit namespace list, none of it lands on this shard.
            return Ok(None);
        } else {
            Vec::new()
        };

        let kinds = ctx
            .account
            .registry()
            .kinds()
            .into_iter()
            .filter(|k| kinds::is_namespaced(k) && ctx.config.caches_kind(k))
            .map(ToString::to_string)
            .collect();

        Ok(Some(Box::new(CoreCachingAgent {
            agent_type: agent_type_for(&ctx.account.name, CORE_AGENT_NAME, shard),
            account: ctx.account.name.clone(),
            context,
            shard,
            poll_interval_ms: ctx.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            kinds,
            namespaces,
            omit_namespaces,
        })))
    }
}

/// The account's kubeconfig context, rejecting a blank name.
pub(crate) fn kubeconfig_context(ctx: &ShardContext<'_>) -> HandlerResult<Option<String>> {
    match ctx.account.credentials.context.as_deref() {
        Some(context) if context.trim().is_empty() => Err(HandlerError::UnusableCredentials(
            format!("account '{}' has a blank kubeconfig context", ctx.account.name),
        )),
        context => Ok(context.map(ToString::to_string)),
    }
}
