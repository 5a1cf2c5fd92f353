pub mod account;
pub mod config;
pub mod registry;
pub mod shard;

pub use account::{AccountContext, KubernetesCredentials};
pub use config::{AccountConfig, CacheConfig, Config, LoggingConfig, RotationPolicy};
pub use registry::HandlerRegistry;
pub use shard::{agent_type_for, ShardSpec};
