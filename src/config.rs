//! Configuration Module
//!
//! Handles loading cache and fetcher settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default remote catalog root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache entry lifetime and sweep interval, in seconds
    pub cache_ttl: u64,
    /// Per-request HTTP timeout in seconds
    pub http_timeout: u64,
    /// Base URL that relative cache keys are resolved against
    pub base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 300)
    /// - `HTTP_TIMEOUT_SECS` - HTTP timeout in seconds (default: 5)
    /// - `API_BASE_URL` - Catalog root (default: `https://pokeapi.co/api/v2`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
            http_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout),
            base_url: env::var("API_BASE_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
        }
    }

    /// Rejects values the cache or fetcher cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_TTL_SECS must be greater than zero".to_string(),
            ));
        }
        if self.http_timeout == 0 {
            return Err(CacheError::InvalidConfig(
                "HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if self.base_url.is_empty() {
            return Err(CacheError::InvalidConfig(
                "API_BASE_URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 300,
            http_timeout: 5,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.http_timeout, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("HTTP_TIMEOUT_SECS");
        env::remove_var("API_BASE_URL");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.http_timeout, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config {
            cache_ttl: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_empty_url() {
        let no_timeout = Config {
            http_timeout: 0,
            ..Config::default()
        };
        assert!(no_timeout.validate().is_err());

        let no_url = Config {
            base_url: String::new(),
            ..Config::default()
        };
        assert!(no_url.validate().is_err());
    }
}
