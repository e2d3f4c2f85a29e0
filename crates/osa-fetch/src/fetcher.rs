//! Multi-tier data fetcher
//!
//! Composes the endpoint, the cache, and a single-flight map into the
//! fetch stage of the pipeline. The fetcher is infallible from the
//! caller's point of view: every tier request produces a `TierData`
//! record, with failures converted into fallback records rather than
//! propagated. Tiers are fetched concurrently and fail independently.

use crate::config::FetcherConfig;
use osa_domain::traits::{TierCache, TierEndpoint};
use osa_domain::{
    Confidence, DataSource, TierData, TierKey, TierLevel, TierPath, TierSet, WidgetManifest,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Tier data fetcher with caching and request de-duplication
///
/// Concurrent requests for the same `TierKey` share one in-flight fetch:
/// the first caller becomes the leader and performs the network request,
/// later callers wait on a watch channel for its result.
pub struct TierFetcher<E: TierEndpoint> {
    endpoint: E,
    cache: Arc<dyn TierCache>,
    config: FetcherConfig,
    inflight: Mutex<HashMap<TierKey, watch::Receiver<Option<TierData>>>>,
}

enum Flight {
    Leader(watch::Sender<Option<TierData>>),
    Follower(watch::Receiver<Option<TierData>>),
}

impl<E: TierEndpoint> TierFetcher<E> {
    /// Create a fetcher over an endpoint and a cache
    pub fn new(endpoint: E, cache: Arc<dyn TierCache>, config: FetcherConfig) -> Self {
        Self {
            endpoint,
            cache,
            config,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Fetcher configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch one tier, consulting the cache first
    pub async fn fetch_tier(&self, key: &TierKey) -> TierData {
        self.fetch_inner(key, true).await
    }

    /// Fetch one tier from the network, bypassing the cache read path
    ///
    /// Successful payloads still land in the cache (the
    /// stale-while-revalidate write path).
    pub async fn refresh_tier(&self, key: &TierKey) -> TierData {
        self.fetch_inner(key, false).await
    }

    /// Fetch every tier a page needs, concurrently
    ///
    /// With `prefetch_tiers` disabled, only tiers the manifest draws from
    /// are requested; skipped tiers yield fallback records the resolver
    /// never reads. Tiers the path cannot address (e.g. tier 3 of a
    /// category-level path) also yield fallback records.
    pub async fn fetch_all(&self, path: &TierPath, manifest: &WidgetManifest) -> TierSet {
        self.fetch_set(path, manifest, false).await
    }

    /// Re-fetch every tier a page needs, bypassing the cache read path
    pub async fn refresh_all(&self, path: &TierPath, manifest: &WidgetManifest) -> TierSet {
        self.fetch_set(path, manifest, true).await
    }

    async fn fetch_set(
        &self,
        path: &TierPath,
        manifest: &WidgetManifest,
        bypass_cache: bool,
    ) -> TierSet {
        let needed: Vec<TierLevel> = if self.config.prefetch_tiers {
            TierLevel::all().to_vec()
        } else {
            manifest.levels_in_use()
        };

        let (tier1, tier2, tier3) = tokio::join!(
            self.fetch_level(TierLevel::One, path, &needed, bypass_cache),
            self.fetch_level(TierLevel::Two, path, &needed, bypass_cache),
            self.fetch_level(TierLevel::Three, path, &needed, bypass_cache),
        );

        TierSet {
            tier1,
            tier2,
            tier3,
        }
    }

    async fn fetch_level(
        &self,
        level: TierLevel,
        path: &TierPath,
        needed: &[TierLevel],
        bypass_cache: bool,
    ) -> TierData {
        if !needed.contains(&level) {
            return TierData::fallback(level);
        }
        match TierKey::for_level(level, path) {
            Some(key) => self.fetch_inner(&key, !bypass_cache).await,
            None => TierData::fallback(level),
        }
    }

    async fn fetch_inner(&self, key: &TierKey, read_cache: bool) -> TierData {
        if read_cache {
            if let Some(entry) = self.cache.get(key) {
                let age = entry.age();
                let mut data = TierData::cached(
                    key.level,
                    entry.payload,
                    entry.stored_at,
                    Confidence::cached(age, self.config.cache_ttl()),
                );
                // A just-written entry is indistinguishable from live data
                if age < self.config.freshness_window() {
                    data.source = DataSource::Live;
                    data.confidence = Confidence::live(age, self.config.refresh_interval());
                }
                return data;
            }
        }

        match self.join_or_lead(key).await {
            Flight::Follower(mut rx) => {
                // Clone out of the watch guard before matching; holding it
                // across an await would make the future !Send
                let published = rx.wait_for(|v| v.is_some()).await.map(|value| value.clone());
                match published {
                    Ok(value) => value.unwrap_or_else(|| TierData::fallback(key.level)),
                    Err(_) => {
                        // Leader dropped without publishing; clear the dead flight
                        self.remove_dead_flight(key).await;
                        TierData::fallback(key.level)
                    }
                }
            }
            Flight::Leader(tx) => {
                let data = self.fetch_network(key).await;
                if let Some(payload) = &data.payload {
                    self.cache.insert(key, payload.clone());
                }
                let _ = tx.send(Some(data.clone()));
                self.inflight.lock().await.remove(key);
                data
            }
        }
    }

    async fn join_or_lead(&self, key: &TierKey) -> Flight {
        let mut inflight = self.inflight.lock().await;
        if let Some(rx) = inflight.get(key) {
            Flight::Follower(rx.clone())
        } else {
            let (tx, rx) = watch::channel(None);
            inflight.insert(key.clone(), rx);
            Flight::Leader(tx)
        }
    }

    async fn remove_dead_flight(&self, key: &TierKey) {
        let mut inflight = self.inflight.lock().await;
        let dead = inflight
            .get(key)
            .map(|rx| rx.has_changed().is_err())
            .unwrap_or(false);
        if dead {
            inflight.remove(key);
        }
    }

    async fn fetch_network(&self, key: &TierKey) -> TierData {
        match self.endpoint.fetch(key).await {
            Ok(payload) => {
                tracing::debug!(key = %key, "tier fetch succeeded");
                TierData::live(
                    key.level,
                    payload,
                    Confidence::live(Duration::ZERO, self.config.refresh_interval()),
                )
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "tier fetch failed, substituting fallback record");
                TierData::fallback(key.level)
            }
        }
    }
}
