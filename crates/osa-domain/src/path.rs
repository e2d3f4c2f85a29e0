//! Tier path and cache key types
//!
//! A `TierPath` is the classification of one URL: the `(tier1, tier2,
//! tier3)` triple, each component optional. A `TierKey` addresses one
//! tier-level data payload for caching and fetching.

use crate::tier::{Tier1, TierLevel};
use serde::{Deserialize, Serialize};

/// Classified `(tier1, tier2, tier3)` triple for one page
///
/// Components are optional: an unrecognized path yields the all-`None`
/// triple and downstream layers degrade to generic content. The triple is
/// prefix-closed: tier2 is only present when tier1 is, tier3 only when
/// tier2 is (enforced by the constructors).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TierPath {
    /// Broad category, if recognized
    pub tier1: Option<Tier1>,
    /// Section slug, if present and well-formed
    pub tier2: Option<String>,
    /// Page slug, if present and well-formed
    pub tier3: Option<String>,
}

impl TierPath {
    /// The all-`None` triple (generic classification)
    pub fn generic() -> Self {
        Self::default()
    }

    /// Category-level path
    pub fn category(tier1: Tier1) -> Self {
        Self {
            tier1: Some(tier1),
            tier2: None,
            tier3: None,
        }
    }

    /// Section-level path
    pub fn section(tier1: Tier1, tier2: impl Into<String>) -> Self {
        Self {
            tier1: Some(tier1),
            tier2: Some(tier2.into()),
            tier3: None,
        }
    }

    /// Page-level path
    pub fn page(tier1: Tier1, tier2: impl Into<String>, tier3: impl Into<String>) -> Self {
        Self {
            tier1: Some(tier1),
            tier2: Some(tier2.into()),
            tier3: Some(tier3.into()),
        }
    }

    /// True when no tier could be determined
    pub fn is_generic(&self) -> bool {
        self.tier1.is_none()
    }

    /// Number of determined components (0 through 3)
    pub fn specificity(&self) -> u8 {
        match (&self.tier1, &self.tier2, &self.tier3) {
            (Some(_), Some(_), Some(_)) => 3,
            (Some(_), Some(_), None) => 2,
            (Some(_), None, _) => 1,
            (None, _, _) => 0,
        }
    }

    /// The next-coarser path (drops the finest determined component)
    pub fn parent(&self) -> Option<Self> {
        match self.specificity() {
            3 => Some(Self {
                tier1: self.tier1,
                tier2: self.tier2.clone(),
                tier3: None,
            }),
            2 => Some(Self {
                tier1: self.tier1,
                tier2: None,
                tier3: None,
            }),
            1 => Some(Self::generic()),
            _ => None,
        }
    }
}

impl std::fmt::Display for TierPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.tier1, &self.tier2, &self.tier3) {
            (Some(t1), Some(t2), Some(t3)) => write!(f, "{}/{}/{}", t1, t2, t3),
            (Some(t1), Some(t2), None) => write!(f, "{}/{}", t1, t2),
            (Some(t1), None, _) => write!(f, "{}", t1),
            (None, _, _) => f.write_str("(generic)"),
        }
    }
}

/// Addressable key for one tier-level payload
///
/// Cache entries and in-flight fetch de-duplication are both keyed by
/// `TierKey`. A key always carries every component its level requires, so
/// two pages sharing a category also share the tier-1 key (and its cached
/// payload).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierKey {
    /// Which tier endpoint this key addresses
    pub level: TierLevel,
    /// Category (always required)
    pub tier1: Tier1,
    /// Section slug (required for levels Two and Three)
    pub tier2: Option<String>,
    /// Page slug (required for level Three)
    pub tier3: Option<String>,
}

impl TierKey {
    /// Build the key for `level` out of a classified path
    ///
    /// Returns `None` when the path does not carry the components the
    /// level requires (e.g. a tier-3 key for a category-level path).
    pub fn for_level(level: TierLevel, path: &TierPath) -> Option<Self> {
        let tier1 = path.tier1?;
        match level {
            TierLevel::One => Some(Self {
                level,
                tier1,
                tier2: None,
                tier3: None,
            }),
            TierLevel::Two => Some(Self {
                level,
                tier1,
                tier2: Some(path.tier2.clone()?),
                tier3: None,
            }),
            TierLevel::Three => Some(Self {
                level,
                tier1,
                tier2: Some(path.tier2.clone()?),
                tier3: Some(path.tier3.clone()?),
            }),
        }
    }

    /// Path segments after the level prefix, in URL order
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.tier1.as_slug()];
        if let Some(t2) = &self.tier2 {
            segments.push(t2.as_str());
        }
        if let Some(t3) = &self.tier3 {
            segments.push(t3.as_str());
        }
        segments
    }
}

impl std::fmt::Display for TierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.level.as_str(), self.segments().join("/"))
    }
}
