use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use thiserror::Error;

use crate::adapters::kubernetes::kinds;
use crate::domain::models::config::Config;

/// Environment variable prefix; `__` separates nested keys
pub const ENV_PREFIX: &str = "KUBECACHE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Account name cannot be empty")]
    EmptyAccountName,

    #[error("Duplicate account name: {0}")]
    DuplicateAccount(String),

    #[error("Account {account} requests unknown kind: {kind}")]
    UnknownKind { account: String, kind: String },
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .kubecache/config.yaml (project config)
    /// 3. .kubecache/local.yaml (local overrides, optional)
    /// 4. Environment variables (KUBECACHE_* prefix, e.g. KUBECACHE_CACHE__ENABLED)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".kubecache/config.yaml"))
            .merge(Yaml::file(".kubecache/local.yaml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let mut seen = HashSet::new();
        for account in &config.accounts {
            if account.name.trim().is_empty() {
                return Err(ConfigError::EmptyAccountName);
            }
            if !seen.insert(account.name.as_str()) {
                return Err(ConfigError::DuplicateAccount(account.name.clone()));
            }
            if let Some(kind) = account.kinds.iter().find(|k| !kinds::is_builtin(k)) {
                return Err(ConfigError::UnknownKind {
                    account: account.name.clone(),
                    kind: kind.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::AccountConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.cache.enabled);
        assert!(config.accounts.is_empty());
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
cache:
  enabled: false
  cache_omit_kinds: [secret]
logging:
  level: debug
  format: pretty
accounts:
  - name: prod
    namespaces: [default, web]
    cache_threads: 3
    cache_interval_seconds: 60
  - name: dev
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert!(!config.cache.enabled);
        assert!(config.cache.cache_all);
        assert_eq!(config.cache.cache_omit_kinds, vec!["secret"]);
        assert_eq!(config.accounts.len(), 2);
        assert_eq!(config.accounts[0].cache_threads, 3);
        assert_eq!(config.accounts[0].cache_interval_seconds, Some(60));
        assert_eq!(config.accounts[1].cache_threads, 1);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_empty_account_name() {
        let config = Config {
            accounts: vec![AccountConfig::named("  ")],
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyAccountName)
        ));
    }

    #[test]
    fn test_validate_duplicate_account() {
        let config = Config {
            accounts: vec![AccountConfig::named("prod"), AccountConfig::named("prod")],
            ..Default::default()
        };

        match ConfigLoader::validate(&config) {
            Err(ConfigError::DuplicateAccount(name)) => assert_eq!(name, "prod"),
            other => panic!("Expected DuplicateAccount error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_unknown_kind() {
        let mut account = AccountConfig::named("prod");
        account.kinds = vec!["pod".to_string(), "widget".to_string()];
        let config = Config {
            accounts: vec![account],
            ..Default::default()
        };

        match ConfigLoader::validate(&config) {
            Err(ConfigError::UnknownKind { account, kind }) => {
                assert_eq!(account, "prod");
                assert_eq!(kind, "widget");
            }
            other => panic!("Expected UnknownKind error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("accounts:\n  - name: prod\n    cache_threads: 2\n");

        let config = temp_env::with_var_unset("KUBECACHE_CACHE__ENABLED", || {
            ConfigLoader::load_from_file(file.path())
        })
        .unwrap();

        assert!(config.cache.enabled);
        assert_eq!(config.accounts[0].name, "prod");
        assert_eq!(config.accounts[0].cache_threads, 2);
    }

    #[test]
    fn test_env_override_disables_cache() {
        let file = write_config("cache:\n  enabled: true\n");

        let config = temp_env::with_var("KUBECACHE_CACHE__ENABLED", Some("false"), || {
            ConfigLoader::load_from_file(file.path())
        })
        .unwrap();

        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_config() {
        let file = write_config("accounts:\n  - name: a\n  - name: a\n");

        let result = temp_env::with_var_unset("KUBECACHE_CACHE__ENABLED", || {
            ConfigLoader::load_from_file(file.path())
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let base = write_config("cache:\n  enabled: true\nlogging:\n  level: info\n  format: json\n");
        let overrides = write_config("cache:\n  enabled: false\nlogging:\n  level: debug\n");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base.path()))
            .merge(Yaml::file(overrides.path()))
            .extract()
            .unwrap();

        assert!(!config.cache.enabled, "Override should win");
        assert_eq!(config.logging.level, "debug", "Override should win for nested fields");
        assert_eq!(config.logging.format, "json", "Base value should persist when not overridden");
    }
}
