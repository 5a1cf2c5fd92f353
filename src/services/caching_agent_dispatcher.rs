//! Caching agent dispatcher.
//!
//! Dispatch is a single-shot computation per account:
//!
//! 1. [`should_dispatch`] checks `cache.enabled` and short-circuits to an
//!    empty set when caching is off, without touching any handler.
//! 2. [`plan`] invokes every registered handler for every shard.
//! 3. [`collapse`] keeps one agent per agent type, last write wins.
//!
//! No state is kept between calls. A handler failure aborts the account's
//! dispatch and is returned to the caller; nothing is retried.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::models::{AccountContext, CacheConfig};
use crate::services::dedup_collapser::{collapse, AgentSet};
use crate::services::dispatch_gate::should_dispatch;
use crate::services::shard_planner::plan;

/// Compute the caching agents for one account.
#[instrument(skip_all, fields(account = %account.name))]
pub fn dispatch(account: &AccountContext, config: &CacheConfig) -> DispatchResult<AgentSet> {
    if !should_dispatch(config) {
        return Ok(AgentSet::default());
    }

    let candidates = plan(account, config)?;
    let candidate_count = candidates.len();
    let agents = collapse(candidates);

    info!(
        shards = account.cache_threads,
        handlers = account.registry().len(),
        candidates = candidate_count,
        agents = agents.len(),
        "built caching agents"
    );

    Ok(agents)
}

/// Builds caching agents for accounts under one global cache configuration.
#[derive(Debug, Clone)]
pub struct CachingAgentDispatcher {
    config: Arc<CacheConfig>,
}

impl CachingAgentDispatcher {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Build every caching agent for `account`.
    pub fn build_all_caching_agents(&self, account: &AccountContext) -> DispatchResult<AgentSet> {
        dispatch(account, &self.config)
    }

    /// Dispatch several accounts concurrently, one blocking task per account.
    ///
    /// Results are returned in input order. The first failed account (in input
    /// order) is returned as the error and the other results are discarded.
    pub async fn build_for_accounts(
        &self,
        accounts: Vec<Arc<AccountContext>>,
    ) -> DispatchResult<Vec<(String, AgentSet)>> {
        let handles: Vec<_> = accounts
            .into_iter()
            .map(|account| {
                let config = Arc::clone(&self.config);
                let name = account.name.clone();
                let handle = tokio::task::spawn_blocking(move || dispatch(&account, &config));
                (name, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some((name, handle)) = pending.next() {
            let outcome = handle
                .await
                .map_err(|e| DispatchError::TaskFailed {
                    account: name.clone(),
                    reason: e.to_string(),
                })
                .and_then(|result| result);

            match outcome {
                Ok(agents) => results.push((name, agents)),
                Err(err) => {
                    // Dropped handles detach; their results are never read.
                    let abandoned: Vec<String> = pending.map(|(name, _)| name).collect();
                    if !abandoned.is_empty() {
                        debug!(failed = %name, ?abandoned, "discarding dispatch of remaining accounts");
                    }
                    return Err(err);
                }
            }
        }

        Ok(results)
    }
}

impl Default for CachingAgentDispatcher {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
