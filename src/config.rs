//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default provider endpoint
pub const DEFAULT_SPACEX_BASE_URL: &str = "https://api.spacexdata.com/v5";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime in seconds of every cache entry, upstream and rendered alike
    pub cache_ttl_seconds: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the launch data provider
    pub spacex_base_url: String,
    /// Per-request timeout for provider calls, in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Cache entry lifetime (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SPACEX_BASE_URL` - Provider base URL (default: https://api.spacexdata.com/v5)
    /// - `UPSTREAM_TIMEOUT_SECS` - Provider request timeout (default: 15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            spacex_base_url: env::var("SPACEX_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.spacex_base_url),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs),
        }
    }

    /// Provider timeout as a `Duration`.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 60,
            server_port: 3000,
            spacex_base_url: DEFAULT_SPACEX_BASE_URL.to_string(),
            upstream_timeout_secs: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.spacex_base_url, DEFAULT_SPACEX_BASE_URL);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("LAUNCH_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("LAUNCH_CACHE_TEST_GARBAGE", 42u64), 42);

        env::set_var("LAUNCH_CACHE_TEST_VALID", " 7 ");
        assert_eq!(env_or("LAUNCH_CACHE_TEST_VALID", 42u64), 7);

        assert_eq!(env_or("LAUNCH_CACHE_TEST_UNSET_VARIABLE", 9u16), 9);
    }
}
