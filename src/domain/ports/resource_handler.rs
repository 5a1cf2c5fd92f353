//! Resource handler port.
//!
//! A handler knows how to construct the caching agent for one resource kind.
//! The dispatcher calls it once per shard with a [`ShardContext`] and never
//! inspects how the agent is built.

use crate::domain::error::HandlerResult;
use crate::domain::models::{AccountContext, CacheConfig, ShardSpec};
use crate::domain::ports::caching_agent::CachingAgent;

/// Everything a handler receives when asked to build an agent for one shard.
#[derive(Debug, Clone, Copy)]
pub struct ShardContext<'a> {
    /// Account being dispatched
    pub account: &'a AccountContext,
    /// Zero-based shard index, always `< shard_count`
    pub shard_index: u32,
    /// Total number of shards for the account
    pub shard_count: u32,
    /// Account poll interval override in milliseconds, if configured
    pub poll_interval_ms: Option<u64>,
    /// Global cache configuration, passed through verbatim
    pub config: &'a CacheConfig,
}

impl ShardContext<'_> {
    /// The shard addressed by this context.
    pub const fn shard(&self) -> ShardSpec {
        ShardSpec {
            index: self.shard_index,
            count: self.shard_count,
        }
    }

    /// Whether this is the first shard of the sweep.
    pub const fn is_first_shard(&self) -> bool {
        self.shard_index == 0
    }
}

/// Port implemented once per resource kind.
pub trait ResourceHandler: Send + Sync {
    /// Resource kind this handler is registered under (e.g. `deployment`).
    fn kind(&self) -> &str;

    /// Build the caching agent for one shard.
    ///
    /// `Ok(None)` means the handler has no work for this shard and is not an
    /// error. Handlers that do not partition their work may return an agent
    /// with the same agent type on every shard; only one survives dispatch.
    fn build_caching_agent(
        &self,
        ctx: &ShardContext<'_>,
    ) -> HandlerResult<Option<Box<dyn CachingAgent>>>;
}
