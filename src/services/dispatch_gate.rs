//! Configuration gate for caching-agent dispatch.

use tracing::info;

use crate::domain::models::CacheConfig;

/// Whether dispatch should proceed under this configuration.
///
/// Logs an informational notice when caching is disabled; this is a normal
/// outcome, not an error.
pub fn should_dispatch(config: &CacheConfig) -> bool {
    if !config.enabled {
        info!("Caching is disabled by configuration ('cache.enabled')");
        return false;
    }
    true
}
