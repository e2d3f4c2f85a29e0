//! Tier module - the three levels of page granularity
//!
//! Every page the dashboard can show sits at one of three levels of
//! granularity: a broad category (tier 1), a section within it (tier 2),
//! and a specific page (tier 3). Each level has its own data payload and
//! refresh cadence.

use serde::{Deserialize, Serialize};

/// Level of page granularity
///
/// - One: broad category (fixed vocabulary)
/// - Two: section within a category
/// - Three: specific page within a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierLevel {
    /// Broad category (e.g. strategy-plans)
    One,
    /// Section within a category (e.g. osa)
    Two,
    /// Specific page within a section (e.g. overview-dashboard)
    Three,
}

impl TierLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TierLevel::One => "tier1",
            TierLevel::Two => "tier2",
            TierLevel::Three => "tier3",
        }
    }

    /// Parse a level from its numeric form (1, 2 or 3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(TierLevel::One),
            2 => Some(TierLevel::Two),
            3 => Some(TierLevel::Three),
            _ => None,
        }
    }

    /// Numeric form of the level
    pub fn as_number(&self) -> u8 {
        match self {
            TierLevel::One => 1,
            TierLevel::Two => 2,
            TierLevel::Three => 3,
        }
    }

    /// The next coarser level, if any
    pub fn coarser(&self) -> Option<Self> {
        match self {
            TierLevel::One => None,
            TierLevel::Two => Some(TierLevel::One),
            TierLevel::Three => Some(TierLevel::Two),
        }
    }

    /// All levels, coarsest first
    pub fn all() -> [TierLevel; 3] {
        [TierLevel::One, TierLevel::Two, TierLevel::Three]
    }
}

/// Tier-1 category vocabulary
///
/// The tier-1 vocabulary is closed: a path segment either names one of
/// these categories (canonically or via a legacy alias) or classifies as
/// unknown. Tier-2 and tier-3 slugs are open vocabularies validated only
/// for shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier1 {
    /// Strategy plans and roadmaps
    StrategyPlans,
    /// DXP tool inventory and status
    DxpTools,
    /// Analytics and insight reporting
    AnalyticsInsights,
    /// Experimentation and experience optimization
    ExperienceOptimization,
}

impl Tier1 {
    /// Canonical slug for this category
    pub fn as_slug(&self) -> &'static str {
        match self {
            Tier1::StrategyPlans => "strategy-plans",
            Tier1::DxpTools => "dxp-tools",
            Tier1::AnalyticsInsights => "analytics-insights",
            Tier1::ExperienceOptimization => "experience-optimization",
        }
    }

    /// Parse a slug, case-insensitively, accepting legacy short forms
    ///
    /// Legacy aliases come from the short-form paths that predate the
    /// canonical `/results/...` layout (`/strategy`, `/dxp`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strategy-plans" | "strategy" => Some(Tier1::StrategyPlans),
            "dxp-tools" | "dxp" => Some(Tier1::DxpTools),
            "analytics-insights" | "analytics" | "insights" => Some(Tier1::AnalyticsInsights),
            "experience-optimization" | "experience" | "optimization" => {
                Some(Tier1::ExperienceOptimization)
            }
            _ => None,
        }
    }

    /// All tier-1 categories
    pub fn all() -> [Tier1; 4] {
        [
            Tier1::StrategyPlans,
            Tier1::DxpTools,
            Tier1::AnalyticsInsights,
            Tier1::ExperienceOptimization,
        ]
    }
}

impl std::str::FromStr for Tier1 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown tier-1 category: {}", s))
    }
}

impl std::fmt::Display for Tier1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(TierLevel::One < TierLevel::Two);
        assert!(TierLevel::Two < TierLevel::Three);
        assert_eq!(TierLevel::Three.coarser(), Some(TierLevel::Two));
        assert_eq!(TierLevel::One.coarser(), None);
    }

    #[test]
    fn test_level_numbers() {
        for level in TierLevel::all() {
            assert_eq!(TierLevel::from_number(level.as_number()), Some(level));
        }
        assert_eq!(TierLevel::from_number(0), None);
        assert_eq!(TierLevel::from_number(4), None);
    }

    #[test]
    fn test_tier1_canonical_slugs() {
        for tier1 in Tier1::all() {
            assert_eq!(Tier1::parse(tier1.as_slug()), Some(tier1));
        }
    }

    #[test]
    fn test_tier1_case_insensitive() {
        assert_eq!(Tier1::parse("Strategy-Plans"), Some(Tier1::StrategyPlans));
        assert_eq!(Tier1::parse("DXP-TOOLS"), Some(Tier1::DxpTools));
    }

    #[test]
    fn test_tier1_legacy_aliases() {
        assert_eq!(Tier1::parse("strategy"), Some(Tier1::StrategyPlans));
        assert_eq!(Tier1::parse("dxp"), Some(Tier1::DxpTools));
        assert_eq!(Tier1::parse("analytics"), Some(Tier1::AnalyticsInsights));
        assert_eq!(
            Tier1::parse("experience"),
            Some(Tier1::ExperienceOptimization)
        );
    }

    #[test]
    fn test_tier1_unknown() {
        assert_eq!(Tier1::parse("foo"), None);
        assert_eq!(Tier1::parse(""), None);
    }
}
