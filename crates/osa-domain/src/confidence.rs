//! Confidence score module
//!
//! A confidence score is a 0-100 heuristic indicating how trustworthy and
//! fresh a displayed value is. Scores live in disjoint bands by data
//! source, so fallback-derived content always reads as lower-confidence
//! than live content:
//!
//! - live: 90-100, decaying with age inside the refresh interval
//! - cache: 60-85, decaying with age toward the cache TTL
//! - fallback/placeholder: 20-40, with placeholders clamped to <= 35

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lower bound of the live band
pub const LIVE_MIN: u8 = 90;
/// Upper bound of the live band
pub const LIVE_MAX: u8 = 100;
/// Lower bound of the cache band
pub const CACHE_MIN: u8 = 60;
/// Upper bound of the cache band
pub const CACHE_MAX: u8 = 85;
/// Score assigned to fallback records and substituted placeholders
pub const FALLBACK_SCORE: u8 = 25;
/// Ceiling for any provisional (placeholder) content
pub const PROVISIONAL_MAX: u8 = 35;
/// Page scores below this show the "data still building" banner
pub const BUILDING_THRESHOLD: u8 = 60;

/// Confidence score in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    /// Create a score, clamping to [0, 100]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Raw score value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Score for live data of the given age
    ///
    /// Fresh data scores 100 and decays linearly to 90 across the refresh
    /// interval; data older than one interval stays at the band floor.
    pub fn live(age: Duration, refresh_interval: Duration) -> Self {
        Self(decay(age, refresh_interval, LIVE_MAX, LIVE_MIN))
    }

    /// Score for cached data of the given age
    ///
    /// A just-written cache entry scores 85 and decays linearly to 60 as
    /// it approaches the TTL.
    pub fn cached(age: Duration, ttl: Duration) -> Self {
        Self(decay(age, ttl, CACHE_MAX, CACHE_MIN))
    }

    /// Score for fallback records and substituted placeholders
    pub fn fallback() -> Self {
        Self(FALLBACK_SCORE)
    }

    /// Clamp into the provisional band (<= 35)
    pub fn clamp_provisional(&self) -> Self {
        Self(self.0.min(PROVISIONAL_MAX))
    }

    /// True when the score marks provisional (placeholder-grade) content
    pub fn is_provisional(&self) -> bool {
        self.0 <= PROVISIONAL_MAX
    }

    /// True when a page at this score should show the building banner
    pub fn is_building(&self) -> bool {
        self.0 < BUILDING_THRESHOLD
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Linear decay from `max` at age zero to `min` at `span` and beyond
fn decay(age: Duration, span: Duration, max: u8, min: u8) -> u8 {
    if span.is_zero() {
        return min;
    }
    let fraction = (age.as_secs_f64() / span.as_secs_f64()).clamp(0.0, 1.0);
    let range = f64::from(max - min);
    (f64::from(max) - fraction * range).round() as u8
}
