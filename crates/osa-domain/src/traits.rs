//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the pipeline and its two
//! external collaborators: the upstream tier data API and the opaque tier
//! cache. Infrastructure implementations live in osa-fetch; tests supply
//! mocks.

use crate::path::TierKey;
use async_trait::async_trait;
use serde_json::Value;
use std::time::SystemTime;

/// Trait for fetching one tier payload from the upstream API
///
/// Implemented by the infrastructure layer (osa-fetch)
#[async_trait]
pub trait TierEndpoint: Send + Sync {
    /// Error type for fetch operations
    type Error: std::fmt::Display + Send;

    /// Fetch the JSON payload for one tier key
    ///
    /// Implementations own their timeout and retry policy; a returned
    /// error means the attempt (including retries) is spent, and the
    /// caller converts it into a fallback record.
    async fn fetch(&self, key: &TierKey) -> Result<Value, Self::Error>;
}

/// A payload held by the tier cache, with its write time
#[derive(Debug, Clone)]
pub struct CachedPayload {
    /// The cached JSON document
    pub payload: Value,
    /// When the payload was written
    pub stored_at: SystemTime,
}

impl CachedPayload {
    /// Wrap a payload written now
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            stored_at: SystemTime::now(),
        }
    }

    /// Age of the entry, saturating to zero on clock skew
    pub fn age(&self) -> std::time::Duration {
        self.stored_at.elapsed().unwrap_or_default()
    }
}

/// Trait for the opaque tier cache collaborator
///
/// The pipeline treats the cache as plain get/set by tier key; eviction
/// policy (TTL, capacity) belongs to the implementation.
pub trait TierCache: Send + Sync {
    /// Look up the cached payload for a key, if still valid
    fn get(&self, key: &TierKey) -> Option<CachedPayload>;

    /// Store a freshly fetched payload for a key
    fn insert(&self, key: &TierKey, payload: Value);
}
