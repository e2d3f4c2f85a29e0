//! Tier data records
//!
//! A `TierData` is one tier-level payload for one page visit: the opaque
//! JSON document, when it was fetched, where it came from, and how much it
//! can be trusted. A failed fetch still produces a record (`source =
//! Fallback`, `payload = None`) so the resolver downstream always has
//! something to work from.

use crate::confidence::Confidence;
use crate::tier::TierLevel;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Where a tier payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Fetched from the upstream API on this render pass
    Live,
    /// Served from the tier cache
    Cache,
    /// Substituted after a fetch failure or a missing tier
    Fallback,
}

impl DataSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Cache => "cache",
            DataSource::Fallback => "fallback",
        }
    }
}

/// One tier-level payload for one page visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierData {
    /// Which tier this record covers
    pub level: TierLevel,
    /// Opaque JSON payload; `None` for fallback records
    pub payload: Option<serde_json::Value>,
    /// When the payload was fetched (or the failure observed)
    pub fetched_at: SystemTime,
    /// Provenance of the payload
    pub source: DataSource,
    /// Trustworthiness score, banded by source
    pub confidence: Confidence,
}

impl TierData {
    /// Record for a payload fetched live on this pass
    pub fn live(level: TierLevel, payload: serde_json::Value, confidence: Confidence) -> Self {
        Self {
            level,
            payload: Some(payload),
            fetched_at: SystemTime::now(),
            source: DataSource::Live,
            confidence,
        }
    }

    /// Record for a payload served from cache
    pub fn cached(
        level: TierLevel,
        payload: serde_json::Value,
        fetched_at: SystemTime,
        confidence: Confidence,
    ) -> Self {
        Self {
            level,
            payload: Some(payload),
            fetched_at,
            source: DataSource::Cache,
            confidence,
        }
    }

    /// Record for a tier whose data could not be obtained
    ///
    /// The payload is empty and the confidence sits in the fallback band;
    /// the resolver substitutes placeholders for every field this tier
    /// was supposed to supply.
    pub fn fallback(level: TierLevel) -> Self {
        Self {
            level,
            payload: None,
            fetched_at: SystemTime::now(),
            source: DataSource::Fallback,
            confidence: Confidence::fallback(),
        }
    }

    /// True when this record carries real (live or cached) data
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

/// The three tier records for one page visit
///
/// Tiers are independent: any subset may be fallback records while the
/// rest carry live or cached data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSet {
    /// Category-level summary data
    pub tier1: TierData,
    /// Section-level KPI data
    pub tier2: TierData,
    /// Page-level detail data
    pub tier3: TierData,
}

impl TierSet {
    /// A set where every tier is a fallback record
    pub fn all_fallback() -> Self {
        Self {
            tier1: TierData::fallback(TierLevel::One),
            tier2: TierData::fallback(TierLevel::Two),
            tier3: TierData::fallback(TierLevel::Three),
        }
    }

    /// The record for a given level
    pub fn get(&self, level: TierLevel) -> &TierData {
        match level {
            TierLevel::One => &self.tier1,
            TierLevel::Two => &self.tier2,
            TierLevel::Three => &self.tier3,
        }
    }

    /// Replace the record for a given level
    pub fn set(&mut self, data: TierData) {
        match data.level {
            TierLevel::One => self.tier1 = data,
            TierLevel::Two => self.tier2 = data,
            TierLevel::Three => self.tier3 = data,
        }
    }

    /// Count of tiers carrying real data
    pub fn live_or_cached_count(&self) -> usize {
        TierLevel::all()
            .iter()
            .filter(|level| self.get(**level).has_payload())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_record() {
        let data = TierData::fallback(TierLevel::Three);
        assert_eq!(data.source, DataSource::Fallback);
        assert!(!data.has_payload());
        assert!(data.confidence.is_provisional());
    }

    #[test]
    fn test_live_record() {
        let data = TierData::live(TierLevel::One, json!({"health_score": 87}), Confidence::new(95));
        assert_eq!(data.source, DataSource::Live);
        assert!(data.has_payload());
        assert!(!data.confidence.is_provisional());
    }

    #[test]
    fn test_set_get_replace() {
        let mut set = TierSet::all_fallback();
        assert_eq!(set.live_or_cached_count(), 0);

        set.set(TierData::live(
            TierLevel::Two,
            json!({"kpis": [1, 2, 3]}),
            Confidence::new(92),
        ));
        assert_eq!(set.live_or_cached_count(), 1);
        assert_eq!(set.get(TierLevel::Two).source, DataSource::Live);
        assert_eq!(set.get(TierLevel::One).source, DataSource::Fallback);
        assert_eq!(set.get(TierLevel::Three).source, DataSource::Fallback);
    }

    #[test]
    fn test_source_names() {
        assert_eq!(DataSource::Live.as_str(), "live");
        assert_eq!(DataSource::Cache.as_str(), "cache");
        assert_eq!(DataSource::Fallback.as_str(), "fallback");
    }
}
