//! Shard planner: the shard x handler cross product.
//!
//! For an account with `N` cache threads, every registered handler is asked
//! to build an agent for every shard index in `0..N`. Invocation order is
//! shard-major, handler-minor and the [`CandidateList`] preserves it, since
//! the dedup collapser resolves identity collisions by that order.

use tracing::{debug, instrument};

use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::models::{AccountContext, CacheConfig};
use crate::domain::ports::{CachingAgent, ShardContext};

/// Agents produced before deduplication, in invocation order.
///
/// May contain several agents with the same agent type.
#[derive(Debug, Default)]
pub struct CandidateList {
    agents: Vec<Box<dyn CachingAgent>>,
}

impl CandidateList {
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agent types in invocation order, duplicates included.
    pub fn agent_types(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.agent_type()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CachingAgent> {
        self.agents.iter().map(|a| a.as_ref())
    }

    fn push(&mut self, agent: Box<dyn CachingAgent>) {
        self.agents.push(agent);
    }
}

impl IntoIterator for CandidateList {
    type Item = Box<dyn CachingAgent>;
    type IntoIter = std::vec::IntoIter<Box<dyn CachingAgent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.into_iter()
    }
}

/// Invoke every handler for every shard of `account`.
///
/// Returns an empty list when the account has zero cache threads. The first
/// handler failure aborts planning and no partial list is returned.
#[instrument(skip_all, fields(account = %account.name, shards = account.cache_threads))]
pub fn plan(account: &AccountContext, config: &CacheConfig) -> DispatchResult<CandidateList> {
    let shard_count = account.cache_threads;
    let poll_interval_ms = account.poll_interval_override_ms();
    let registry = account.registry();
    let mut candidates = CandidateList::default();

    for shard_index in 0..shard_count {
        let ctx = ShardContext {
            account,
            shard_index,
            shard_count,
            poll_interval_ms,
            config,
        };

        for handler in registry.handlers() {
            let built = handler
                .build_caching_agent(&ctx)
                .map_err(|source| DispatchError::AgentConstruction {
                    account: account.name.clone(),
                    kind: handler.kind().to_string(),
                    shard_index,
                    source,
                })?;

            match built {
                Some(agent) => candidates.push(agent),
                None => debug!(kind = handler.kind(), shard_index, "handler declined shard"),
            }
        }
    }

    debug!(candidates = candidates.len(), "planned caching agents");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{HandlerError, HandlerResult};
    use crate::domain::models::{HandlerRegistry, KubernetesCredentials, ShardSpec};
    use crate::domain::ports::ResourceHandler;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct StubAgent {
        agent_type: String,
        shard: ShardSpec,
        interval: u64,
    }

    impl CachingAgent for StubAgent {
        fn agent_type(&self) -> &str {
            &self.agent_type
        }

        fn account_name(&self) -> &str {
            "test"
        }

        fn shard(&self) -> ShardSpec {
            self.shard
        }

        fn poll_interval_ms(&self) -> u64 {
            self.interval
        }
    }

    /// Records every invocation as `kind@shard/count`.
    struct RecordingHandler {
        kind: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
        decline_odd: bool,
        fail_on_shard: Option<u32>,
    }

    impl RecordingHandler {
        fn new(kind: &'static str, calls: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                kind,
                calls: Arc::clone(calls),
                decline_odd: false,
                fail_on_shard: None,
            }
        }
    }

    impl ResourceHandler for RecordingHandler {
        fn kind(&self) -> &str {
            self.kind
        }

        fn build_caching_agent(
            &self,
            ctx: &ShardContext<'_>,
        ) -> HandlerResult<Option<Box<dyn CachingAgent>>> {
            self.calls.lock().unwrap().push(format!(
                "{}@{}/{}",
                self.kind, ctx.shard_index, ctx.shard_count
            ));

            if self.fail_on_shard == Some(ctx.shard_index) {
                return Err(HandlerError::ConstructionFailed("boom".to_string()));
            }
            if self.decline_odd && ctx.shard_index % 2 == 1 {
                return Ok(None);
            }

            Ok(Some(Box::new(StubAgent {
                agent_type: format!("{}-{}", self.kind, ctx.shard_index),
                shard: ctx.shard(),
                interval: ctx.poll_interval_ms.unwrap_or(0),
            })))
        }
    }

    fn account(registry: HandlerRegistry, threads: u32) -> AccountContext {
        AccountContext::new("test", KubernetesCredentials::new(registry)).with_cache_threads(threads)
    }

    #[test]
    fn test_plan_is_shard_major_handler_minor() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::new()
            .with_handler(RecordingHandler::new("a", &calls))
            .with_handler(RecordingHandler::new("b", &calls));

        let candidates = plan(&account(registry, 2), &CacheConfig::default()).unwrap();

        assert_eq!(candidates.agent_types(), vec!["a-0", "b-0", "a-1", "b-1"]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["a@0/2", "b@0/2", "a@1/2", "b@1/2"]
        );
    }

    #[test]
    fn test_zero_threads_invokes_nothing() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::new().with_handler(RecordingHandler::new("a", &calls));

        let candidates = plan(&account(registry, 0), &CacheConfig::default()).unwrap();

        assert!(candidates.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_declined_shards_are_skipped() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut handler = RecordingHandler::new("a", &calls);
        handler.decline_odd = true;
        let registry = HandlerRegistry::new().with_handler(handler);

        let candidates = plan(&account(registry, 4), &CacheConfig::default()).unwrap();

        assert_eq!(candidates.agent_types(), vec!["a-0", "a-2"]);
        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_interval_override_passed_in_millis() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::new().with_handler(RecordingHandler::new("a", &calls));
        let account = account(registry, 1).with_cache_interval_seconds(12);

        let candidates = plan(&account, &CacheConfig::default()).unwrap();

        let agent = candidates.iter().next().unwrap();
        assert_eq!(agent.poll_interval_ms(), 12_000);
    }

    #[test]
    fn test_handler_failure_aborts_remaining_shards() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut failing = RecordingHandler::new("a", &calls);
        failing.fail_on_shard = Some(1);
        let registry = HandlerRegistry::new()
            .with_handler(failing)
            .with_handler(RecordingHandler::new("b", &calls));

        let err = plan(&account(registry, 3), &CacheConfig::default()).unwrap_err();

        match err {
            DispatchError::AgentConstruction {
                kind, shard_index, ..
            } => {
                assert_eq!(kind, "a");
                assert_eq!(shard_index, 1);
            }
            other => panic!("Expected AgentConstruction, got {other:?}"),
        }
        assert_eq!(*calls.lock().unwrap(), vec!["a@0/3", "b@0/3", "a@1/3"]);
    }
}
