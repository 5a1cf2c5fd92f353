//! Caching agent port.
//!
//! Agents are the unit handed to an external scheduler. Dispatch only needs an
//! agent's identity; the other accessors exist so the scheduler and the CLI
//! can describe what each agent will poll.

use serde::Serialize;
use std::fmt::Debug;

use crate::domain::models::ShardSpec;

/// Default poll interval applied by agents when the account has no override.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// A constructed caching agent, ready to be scheduled.
pub trait CachingAgent: Debug + Send + Sync {
    /// Identity used for scheduling and deduplication.
    fn agent_type(&self) -> &str;

    /// Account whose resources this agent polls.
    fn account_name(&self) -> &str;

    /// Shard of the account's workload this agent covers.
    fn shard(&self) -> ShardSpec;

    /// Effective poll interval in milliseconds.
    fn poll_interval_ms(&self) -> u64;

    /// Resource kinds this agent polls.
    fn kinds(&self) -> &[String] {
        &[]
    }

    /// Namespaces this agent polls (empty for cluster-scoped agents).
    fn namespaces(&self) -> &[String] {
        &[]
    }

    /// Namespaces skipped even when [`namespaces`](Self::namespaces) is empty.
    fn omit_namespaces(&self) -> &[String] {
        &[]
    }

    /// Kubeconfig context the agent connects with, `None` for the current one.
    fn context(&self) -> Option<&str> {
        None
    }

    fn summary(&self) -> AgentSummary {
        let shard = self.shard();
        AgentSummary {
            agent_type: self.agent_type().to_string(),
            account: self.account_name().to_string(),
            context: self.context().map(ToString::to_string),
            shard_index: shard.index,
            shard_count: shard.count,
            poll_interval_ms: self.poll_interval_ms(),
            kinds: self.kinds().to_vec(),
            namespaces: self.namespaces().to_vec(),
            omit_namespaces: self.omit_namespaces().to_vec(),
        }
    }
}

/// Serializable description of a caching agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub agent_type: String,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub shard_index: u32,
    pub shard_count: u32,
    pub poll_interval_ms: u64,
    pub kinds: Vec<String>,
    pub namespaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omit_namespaces: Vec<String>,
}
