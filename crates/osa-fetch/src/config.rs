//! Fetcher configuration
//!
//! Timeouts, retry counts, refresh cadence, and cache policy for the
//! multi-tier data fetcher. Loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Fetcher configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Configuration for the multi-tier data fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL of the upstream tier data API (e.g. "http://localhost:3000")
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts per tier request (default: 3)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Auto-refresh cadence for mounted pages in seconds (default: 60)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Cache entry TTL in seconds (default: 300)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Cache hits younger than this count as live data, in seconds
    /// (default: 5)
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,

    /// Fetch all three tiers even when the current widget's manifest
    /// draws from fewer (default: true)
    #[serde(default = "default_prefetch_tiers")]
    pub prefetch_tiers: bool,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_freshness_window_secs() -> u64 {
    5
}

fn default_prefetch_tiers() -> bool {
    true
}

impl FetcherConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: FetcherConfig = toml::from_str(&contents)?;

        if config.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        FetcherConfig {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            max_retries: 3,
            refresh_interval_secs: 60,
            cache_ttl_secs: 300,
            freshness_window_secs: 5,
            prefetch_tiers: true,
        }
    }

    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Refresh cadence as a Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Cache TTL as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Freshness window as a Duration
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config() {
        let config = FetcherConfig::default_test_config();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.max_retries, 3);
        assert!(config.prefetch_tiers);
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let toml = r#"
            base_url = "https://api.example.com"
            refresh_interval_secs = 30
        "#;

        let config: FetcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.refresh_interval_secs, 30);
        // Unspecified fields take their defaults
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 300);
        assert!(config.prefetch_tiers);
    }

    #[test]
    fn test_duration_conversions() {
        let config = FetcherConfig::default_test_config();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.freshness_window(), Duration::from_secs(5));
    }

    #[test]
    fn test_prefetch_disable() {
        let toml = r#"
            base_url = "https://api.example.com"
            prefetch_tiers = false
        "#;
        let config: FetcherConfig = toml::from_str(toml).unwrap();
        assert!(!config.prefetch_tiers);
    }
}
