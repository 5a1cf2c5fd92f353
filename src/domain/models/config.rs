use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for kubecache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Cache dispatch configuration, forwarded to every handler
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Kubernetes accounts to plan caching agents for
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

/// Global caching configuration.
///
/// Only `enabled` is read by the dispatcher itself. The remaining knobs are
/// passed through untouched to resource handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Master switch, surfaced as `cache.enabled`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache every kind the registry knows about unless omitted
    #[serde(default = "default_true")]
    pub cache_all: bool,

    /// Kinds to cache when `cache_all` is false
    #[serde(default)]
    pub cache_kinds: Vec<String>,

    /// Kinds never to cache, applied after `cache_all`/`cache_kinds`
    #[serde(default)]
    pub cache_omit_kinds: Vec<String>,
}

const fn default_true() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_all: true,
            cache_kinds: vec![],
            cache_omit_kinds: vec![],
        }
    }
}

impl CacheConfig {
    /// Whether a resource kind should be cached under this configuration.
    pub fn caches_kind(&self, kind: &str) -> bool {
        if self.cache_omit_kinds.iter().any(|k| k.eq_ignore_ascii_case(kind)) {
            return false;
        }
        self.cache_all || self.cache_kinds.iter().any(|k| k.eq_ignore_ascii_case(kind))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files (if None logs only to stderr)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// One configured Kubernetes account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AccountConfig {
    /// Unique account name
    pub name: String,

    /// Kubeconfig context to use (defaults to the current context)
    #[serde(default)]
    pub context: Option<String>,

    /// Namespaces to cache (empty means all namespaces)
    #[serde(default)]
    pub namespaces: Vec<String>,

    /// Namespaces to skip
    #[serde(default)]
    pub omit_namespaces: Vec<String>,

    /// Number of shards to split caching across
    #[serde(default = "default_cache_threads")]
    pub cache_threads: u32,

    /// Per-account poll interval override, in seconds
    #[serde(default)]
    pub cache_interval_seconds: Option<u64>,

    /// Built-in kinds to register (empty means all of them)
    #[serde(default)]
    pub kinds: Vec<String>,
}

const fn default_cache_threads() -> u32 {
    1
}

impl AccountConfig {
    /// Minimal account with defaults for everything but the name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: None,
            namespaces: vec![],
            omit_namespaces: vec![],
            cache_threads: default_cache_threads(),
            cache_interval_seconds: None,
            kinds: vec![],
        }
    }
}
