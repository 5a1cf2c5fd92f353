//! kubecache - caching-agent dispatch for Kubernetes accounts
//!
//! Given one account's credentials, the global cache configuration, and the
//! account's registry of resource handlers, kubecache computes the set of
//! caching agents an external scheduler will later run. Work is split across
//! the account's configured number of shards and duplicate agent identities
//! are collapsed so each agent type appears once.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): account and configuration models, handler
//!   and agent port traits
//! - **Service Layer** (`services`): configuration gate, shard planner,
//!   dedup collapser, dispatcher
//! - **Adapters** (`adapters`): built-in Kubernetes handlers
//! - **Infrastructure Layer** (`infrastructure`): configuration loading and logging
//! - **CLI Layer** (`cli`): `kubecache plan`
//!
//! # Example
//!
//! ```ignore
//! use kubecache::adapters::kubernetes::builtin_registry;
//! use kubecache::{AccountContext, CacheConfig, CachingAgentDispatcher, KubernetesCredentials};
//!
//! let registry = builtin_registry(&[])?;
//! let account = AccountContext::new("prod", KubernetesCredentials::new(registry))
//!     .with_cache_threads(4);
//! let agents = CachingAgentDispatcher::new(CacheConfig::default())
//!     .build_all_caching_agents(&account)?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{DispatchError, HandlerError};
pub use domain::models::{
    AccountConfig, AccountContext, CacheConfig, Config, HandlerRegistry, KubernetesCredentials,
    ShardSpec,
};
pub use domain::ports::{AgentSummary, CachingAgent, ResourceHandler, ShardContext};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{dispatch, AgentSet, CachingAgentDispatcher, CandidateList};
