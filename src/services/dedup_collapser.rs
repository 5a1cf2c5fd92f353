//! Dedup collapser: one agent per agent type.
//!
//! The candidate list is folded left to right into a map keyed by agent type.
//! On a collision the later candidate replaces the earlier one, so the agent
//! built on the highest shard (or by the later handler within a shard) wins.
//! This is the only place duplicate identities are resolved.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::ports::{AgentSummary, CachingAgent};
use crate::services::shard_planner::CandidateList;

/// Deduplicated agents keyed by agent type. Iteration order is unspecified.
#[derive(Debug, Default)]
pub struct AgentSet {
    agents: HashMap<String, Box<dyn CachingAgent>>,
}

impl AgentSet {
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, agent_type: &str) -> Option<&dyn CachingAgent> {
        self.agents.get(agent_type).map(|a| a.as_ref())
    }

    pub fn contains(&self, agent_type: &str) -> bool {
        self.agents.contains_key(agent_type)
    }

    /// Agent types, sorted for stable display.
    pub fn agent_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CachingAgent> {
        self.agents.values().map(|a| a.as_ref())
    }

    /// Summaries sorted by agent type.
    pub fn summaries(&self) -> Vec<AgentSummary> {
        let mut summaries: Vec<AgentSummary> = self.iter().map(|a| a.summary()).collect();
        summaries.sort_by(|a, b| a.agent_type.cmp(&b.agent_type));
        summaries
    }

    /// Hand the agents over to a scheduler.
    pub fn into_agents(self) -> Vec<Box<dyn CachingAgent>> {
        self.agents.into_values().collect()
    }
}

/// Collapse candidates into an [`AgentSet`], last write wins.
pub fn collapse(candidates: CandidateList) -> AgentSet {
    let mut agents: HashMap<String, Box<dyn CachingAgent>> =
        HashMap::with_capacity(candidates.len());

    for agent in candidates {
        let agent_type = agent.agent_type().to_string();
        if let Some(replaced) = agents.insert(agent_type, agent) {
            debug!(
                agent_type = replaced.agent_type(),
                replaced_shard = %replaced.shard(),
                "later candidate replaced agent with same type"
            );
        }
    }

    AgentSet { agents }
}
