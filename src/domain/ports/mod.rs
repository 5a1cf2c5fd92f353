//! Port trait definitions (Hexagonal Architecture)
//!
//! - ResourceHandler: builds a caching agent for one resource kind and shard
//! - CachingAgent: the constructed unit handed to the external scheduler
//!
//! Built-in Kubernetes handlers live in the adapters layer; tests provide
//! their own implementations.

pub mod caching_agent;
pub mod resource_handler;

pub use caching_agent::{AgentSummary, CachingAgent, DEFAULT_POLL_INTERVAL_MS};
pub use resource_handler::{ResourceHandler, ShardContext};
