//! OSA Fetch Layer
//!
//! Infrastructure implementations of the tier data seams: the reqwest
//! HTTP endpoint, the in-memory tier cache, and the `TierFetcher` that
//! composes them with request de-duplication and per-tier failure
//! isolation.
//!
//! # Failure semantics
//!
//! Nothing in this crate propagates fetch failures to the rendering path.
//! A tier request that fails (connection, timeout, bad status, malformed
//! JSON, retries exhausted) produces a fallback `TierData` record with an
//! empty payload and fallback-band confidence; sibling tiers are
//! unaffected.
//!
//! # Examples
//!
//! ```no_run
//! use osa_fetch::{FetcherConfig, HttpTierEndpoint, MemoryTierCache, TierFetcher};
//! use std::sync::Arc;
//!
//! let config = FetcherConfig::default_test_config();
//! let endpoint = HttpTierEndpoint::from_config(&config).unwrap();
//! let cache = Arc::new(MemoryTierCache::new(config.cache_ttl()));
//! let fetcher = TierFetcher::new(endpoint, cache, config);
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod endpoint;
pub mod fetcher;

pub use cache::MemoryTierCache;
pub use config::{ConfigError, FetcherConfig};
pub use endpoint::HttpTierEndpoint;
pub use fetcher::TierFetcher;

use async_trait::async_trait;
use osa_domain::traits::TierEndpoint;
use osa_domain::TierKey;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching tier data
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, transport)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// Body was not the JSON document we expected
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Every retry attempt failed
    #[error("All {0} retry attempts failed")]
    RetriesExhausted(u32),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::MalformedPayload(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Connection(e.to_string())
        }
    }
}

/// Mock tier endpoint for deterministic testing
///
/// Returns pre-configured payloads per tier key without any network
/// calls, with optional latency and per-key failure injection.
///
/// # Examples
///
/// ```
/// use osa_fetch::MockTierEndpoint;
/// use osa_domain::traits::TierEndpoint;
/// use osa_domain::{Tier1, TierKey, TierLevel, TierPath};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mock = MockTierEndpoint::new();
/// let path = TierPath::category(Tier1::DxpTools);
/// let key = TierKey::for_level(TierLevel::One, &path).unwrap();
/// mock.set_response(&key, json!({"health_score": 87}));
///
/// let payload = mock.fetch(&key).await.unwrap();
/// assert_eq!(payload["health_score"], 87);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTierEndpoint {
    responses: Arc<Mutex<HashMap<TierKey, Value>>>,
    failing: Arc<Mutex<HashSet<TierKey>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl MockTierEndpoint {
    /// Create a mock with no configured responses
    ///
    /// Unconfigured keys answer HTTP 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add simulated latency before every response
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Configure the payload returned for a key
    pub fn set_response(&self, key: &TierKey, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.clone(), payload);
        self.failing.lock().unwrap().remove(key);
    }

    /// Configure a key to fail with a connection error
    pub fn fail(&self, key: &TierKey) {
        self.failing.lock().unwrap().insert(key.clone());
    }

    /// Number of fetch calls made so far
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl TierEndpoint for MockTierEndpoint {
    type Error = FetchError;

    async fn fetch(&self, key: &TierKey) -> Result<Value, FetchError> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().unwrap().contains(key) {
            return Err(FetchError::Connection("mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        responses
            .get(key)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}
