//! Widget field manifests
//!
//! A manifest declares the fields a widget expects: each field has a name
//! (the key looked up in the tier payload), a kind (which shapes both the
//! rendered output and the placeholder used when data is missing), and the
//! tier level that supplies it.

use crate::tier::TierLevel;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Kind of content a manifest field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single scalar value (score, count, percentage)
    Metric,
    /// Array of items (insights, opportunities, next steps)
    List,
    /// Free-form prose block
    Narrative,
}

impl FieldKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Metric => "metric",
            FieldKind::List => "list",
            FieldKind::Narrative => "narrative",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "metric" => Some(FieldKind::Metric),
            "list" => Some(FieldKind::List),
            "narrative" => Some(FieldKind::Narrative),
            _ => None,
        }
    }

    /// Kind-appropriate placeholder value (the Never Blank substitute)
    ///
    /// Placeholder text is deliberately short and non-alarming; a missing
    /// field reads as "still collecting", never as an error.
    pub fn placeholder(&self) -> Value {
        match self {
            FieldKind::Metric => json!("Calculating…"),
            FieldKind::List => json!(["Data collection in progress"]),
            FieldKind::Narrative => {
                json!("Building confidence — initial data collection phase")
            }
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown field kind: {}", s))
    }
}

/// One field a widget expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key looked up in the supplying tier's payload
    pub name: String,
    /// Content kind (drives rendering and placeholder choice)
    pub kind: FieldKind,
    /// Which tier payload supplies this field
    pub level: TierLevel,
}

impl FieldSpec {
    /// Create a field spec
    pub fn new(name: impl Into<String>, kind: FieldKind, level: TierLevel) -> Self {
        Self {
            name: name.into(),
            kind,
            level,
        }
    }
}

/// Ordered set of fields one widget expects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetManifest {
    fields: Vec<FieldSpec>,
}

impl WidgetManifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field addition
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        level: TierLevel,
    ) -> Self {
        self.fields.push(FieldSpec::new(name, kind, level));
        self
    }

    /// Declared fields, in manifest order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// True when the manifest declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Tier levels any declared field draws from
    pub fn levels_in_use(&self) -> Vec<TierLevel> {
        let mut levels: Vec<TierLevel> = self.fields.iter().map(|f| f.level).collect();
        levels.sort();
        levels.dedup();
        levels
    }
}

impl FromIterator<FieldSpec> for WidgetManifest {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [FieldKind::Metric, FieldKind::List, FieldKind::Narrative] {
            assert_eq!(FieldKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(FieldKind::parse("chart"), None);
    }

    #[test]
    fn test_placeholders_never_blank() {
        // Every kind's placeholder must itself be non-null and non-empty
        for kind in [FieldKind::Metric, FieldKind::List, FieldKind::Narrative] {
            let value = kind.placeholder();
            assert!(!value.is_null());
            if let Some(s) = value.as_str() {
                assert!(!s.is_empty());
            }
            if let Some(a) = value.as_array() {
                assert!(!a.is_empty());
            }
        }
    }

    #[test]
    fn test_manifest_builder() {
        let manifest = WidgetManifest::new()
            .with_field("health_score", FieldKind::Metric, TierLevel::One)
            .with_field("insights", FieldKind::List, TierLevel::Three)
            .with_field("summary", FieldKind::Narrative, TierLevel::One);

        assert_eq!(manifest.fields().len(), 3);
        assert_eq!(manifest.fields()[0].name, "health_score");
        assert_eq!(
            manifest.levels_in_use(),
            vec![TierLevel::One, TierLevel::Three]
        );
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = WidgetManifest::new();
        assert!(manifest.is_empty());
        assert!(manifest.levels_in_use().is_empty());
    }
}
