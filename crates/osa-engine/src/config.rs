//! Engine configuration
//!
//! Composite TOML configuration for the full pipeline: the fetcher
//! settings plus an optional path to a rule override file.
//!
//! ```toml
//! rules_overrides = "config/rules.toml"
//!
//! [fetcher]
//! base_url = "http://localhost:3000"
//! refresh_interval_secs = 60
//! ```

use crate::EngineError;
use osa_fetch::FetcherConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration for the rendering engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Multi-tier data fetcher settings
    pub fetcher: FetcherConfig,

    /// Optional path to a rule override TOML file
    #[serde(default)]
    pub rules_overrides: Option<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_contents(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_str_contents(contents: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = toml::from_str(contents)?;

        if config.fetcher.base_url.is_empty() {
            return Err(EngineError::MissingField("fetcher.base_url".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        EngineConfig {
            fetcher: FetcherConfig::default_test_config(),
            rules_overrides: None,
        }
    }
}
