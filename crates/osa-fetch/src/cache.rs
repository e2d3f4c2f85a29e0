//! In-memory tier cache
//!
//! Default implementation of the `TierCache` seam: a TTL-bounded map from
//! tier key to the most recent payload. Expired entries are dropped on
//! read.

use osa_domain::traits::{CachedPayload, TierCache};
use osa_domain::TierKey;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

/// TTL-bounded in-memory tier cache
pub struct MemoryTierCache {
    ttl: Duration,
    entries: RwLock<HashMap<TierKey, CachedPayload>>,
}

impl MemoryTierCache {
    /// Create a cache with the given entry TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently held (expired ones included until read)
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl TierCache for MemoryTierCache {
    fn get(&self, key: &TierKey) -> Option<CachedPayload> {
        let hit = {
            let entries = self.entries.read().unwrap();
            entries.get(key).cloned()
        };

        match hit {
            Some(entry) if entry.age() <= self.ttl => Some(entry),
            Some(_) => {
                // Expired: evict so the map doesn't accumulate dead keys
                self.entries.write().unwrap().remove(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: &TierKey, payload: Value) {
        self.entries
            .write()
            .unwrap()
            .insert(key.clone(), CachedPayload::new(payload));
    }
}
