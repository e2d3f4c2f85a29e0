//! Rule override configuration
//!
//! Admin-editable rule overrides load from TOML into a separate layer on
//! top of the built-in base table. The base table itself is never edited
//! at runtime.

use crate::rule::RenderingRule;
use crate::table::RuleKey;
use osa_domain::{FieldKind, Tier1, TierLevel, WidgetId, WidgetManifest};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Rule configuration error
#[derive(Debug, Error)]
pub enum RulesError {
    /// Failed to read the overrides file
    #[error("Failed to read rules file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse rules TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Override names an unknown tier-1 category
    #[error("Unknown tier-1 category in override: {0}")]
    UnknownTier1(String),

    /// Override names an unknown widget
    #[error("Unknown widget in override: {0}")]
    UnknownWidget(String),

    /// Override field has an unknown kind
    #[error("Unknown field kind in override: {0}")]
    UnknownFieldKind(String),

    /// Override field has a level outside 1..=3
    #[error("Invalid tier level in override: {0}")]
    InvalidLevel(u8),

    /// Override declares tier3 without tier2
    #[error("Override for {0} declares tier3 without tier2")]
    SkippedTier(String),
}

/// TOML model for the override layer
///
/// ```toml
/// [[override]]
/// tier1 = "strategy-plans"
/// tier2 = "osa"
/// widget = "strategy-plans"
/// required_agents = ["strategy_workflow"]
/// dxp_tools = ["cmp"]
///
/// [[override.field]]
/// name = "kpis"
/// kind = "list"
/// level = 2
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// Override entries
    #[serde(default, rename = "override")]
    pub overrides: Vec<RuleOverride>,
}

/// One override entry
#[derive(Debug, Clone, Deserialize)]
pub struct RuleOverride {
    /// Tier-1 category slug
    pub tier1: String,
    /// Section slug (optional: absent means a category-level entry)
    pub tier2: Option<String>,
    /// Page slug (optional; requires tier2)
    pub tier3: Option<String>,
    /// Widget identifier
    pub widget: String,
    /// Upstream agent identifiers
    #[serde(default)]
    pub required_agents: Vec<String>,
    /// DXP tool names
    #[serde(default)]
    pub dxp_tools: Vec<String>,
    /// Manifest fields
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldOverride>,
}

/// One manifest field in an override entry
#[derive(Debug, Clone, Deserialize)]
pub struct FieldOverride {
    /// Payload key
    pub name: String,
    /// Field kind (`metric`, `list`, `narrative`)
    pub kind: String,
    /// Supplying tier level (1, 2 or 3)
    pub level: u8,
}

impl RulesConfig {
    /// Load override configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_contents(&contents)
    }

    /// Parse override configuration from TOML text
    pub fn from_str_contents(contents: &str) -> Result<Self, RulesError> {
        Ok(toml::from_str(contents)?)
    }

    /// Convert into the override layer consumed by `RuleSet`
    pub fn into_overrides(self) -> Result<HashMap<RuleKey, RenderingRule>, RulesError> {
        let mut overrides = HashMap::new();
        for entry in self.overrides {
            let (key, rule) = entry.into_rule()?;
            overrides.insert(key, rule);
        }
        Ok(overrides)
    }
}

impl RuleOverride {
    fn into_rule(self) -> Result<(RuleKey, RenderingRule), RulesError> {
        let tier1 =
            Tier1::parse(&self.tier1).ok_or_else(|| RulesError::UnknownTier1(self.tier1.clone()))?;
        let widget = WidgetId::parse(&self.widget)
            .ok_or_else(|| RulesError::UnknownWidget(self.widget.clone()))?;

        let key = match (self.tier2, self.tier3) {
            (Some(t2), Some(t3)) => RuleKey::page(tier1, t2, t3),
            (Some(t2), None) => RuleKey::section(tier1, t2),
            (None, None) => RuleKey::category(tier1),
            (None, Some(_)) => return Err(RulesError::SkippedTier(self.tier1)),
        };

        let mut manifest = WidgetManifest::new();
        for field in self.fields {
            let kind = FieldKind::parse(&field.kind)
                .ok_or_else(|| RulesError::UnknownFieldKind(field.kind.clone()))?;
            let level = TierLevel::from_number(field.level)
                .ok_or(RulesError::InvalidLevel(field.level))?;
            manifest = manifest.with_field(field.name, kind, level);
        }

        let rule = RenderingRule::new(widget)
            .with_agents(self.required_agents)
            .with_dxp_tools(self.dxp_tools)
            .with_manifest(manifest);
        Ok((key, rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[override]]
        tier1 = "strategy-plans"
        tier2 = "osa"
        widget = "generic-fallback"
        required_agents = ["pilot_agent"]
        dxp_tools = ["cmp"]

        [[override.field]]
        name = "kpis"
        kind = "list"
        level = 2
    "#;

    #[test]
    fn test_parse_sample() {
        let config = RulesConfig::from_str_contents(SAMPLE).unwrap();
        assert_eq!(config.overrides.len(), 1);

        let overrides = config.into_overrides().unwrap();
        let key = RuleKey::section(Tier1::StrategyPlans, "osa");
        let rule = overrides.get(&key).unwrap();
        assert_eq!(rule.widget, WidgetId::GenericFallback);
        assert_eq!(rule.required_agents, vec!["pilot_agent"]);
        assert_eq!(rule.manifest.fields().len(), 1);
        assert_eq!(rule.manifest.fields()[0].level, TierLevel::Two);
    }

    #[test]
    fn test_empty_config() {
        let config = RulesConfig::from_str_contents("").unwrap();
        assert!(config.into_overrides().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_tier1_rejected() {
        let toml = r#"
            [[override]]
            tier1 = "nope"
            widget = "generic-fallback"
        "#;
        let config = RulesConfig::from_str_contents(toml).unwrap();
        assert!(matches!(
            config.into_overrides(),
            Err(RulesError::UnknownTier1(_))
        ));
    }

    #[test]
    fn test_unknown_widget_rejected() {
        let toml = r#"
            [[override]]
            tier1 = "dxp-tools"
            widget = "pie-chart"
        "#;
        let config = RulesConfig::from_str_contents(toml).unwrap();
        assert!(matches!(
            config.into_overrides(),
            Err(RulesError::UnknownWidget(_))
        ));
    }

    #[test]
    fn test_tier3_without_tier2_rejected() {
        let toml = r#"
            [[override]]
            tier1 = "dxp-tools"
            tier3 = "overview"
            widget = "dxp-tools"
        "#;
        let config = RulesConfig::from_str_contents(toml).unwrap();
        assert!(matches!(
            config.into_overrides(),
            Err(RulesError::SkippedTier(_))
        ));
    }

    #[test]
    fn test_bad_level_rejected() {
        let toml = r#"
            [[override]]
            tier1 = "dxp-tools"
            widget = "dxp-tools"

            [[override.field]]
            name = "x"
            kind = "metric"
            level = 9
        "#;
        let config = RulesConfig::from_str_contents(toml).unwrap();
        assert!(matches!(
            config.into_overrides(),
            Err(RulesError::InvalidLevel(9))
        ));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(matches!(
            RulesConfig::from_str_contents("not [ valid"),
            Err(RulesError::TomlParse(_))
        ));
    }
}
