//! Service layer module
//!
//! Dispatch logic for caching agents:
//! - Configuration gate (`cache.enabled`)
//! - Shard planner (shard x handler cross product)
//! - Dedup collapser (one agent per agent type)
//! - Caching agent dispatcher tying the three together

pub mod caching_agent_dispatcher;
pub mod dedup_collapser;
pub mod dispatch_gate;
pub mod shard_planner;

pub use caching_agent_dispatcher::{dispatch, CachingAgentDispatcher};
pub use dedup_collapser::{collapse, AgentSet};
pub use dispatch_gate::should_dispatch;
pub use shard_planner::{plan, CandidateList};
