//! Rule table and resolution
//!
//! The rule table is immutable once built: a base table constructed at
//! startup plus an optional override layer loaded from configuration.
//! Resolution walks specificity levels finest-first (`(t1,t2,t3)`, then
//! `(t1,t2)`, then `(t1)`), consulting overrides before the base at each
//! level, and lands on the designated default rule when every level
//! misses. It never fails.

use crate::rule::RenderingRule;
use osa_domain::{FieldKind, Tier1, TierLevel, TierPath, WidgetId, WidgetManifest};
use std::collections::{HashMap, HashSet};

/// Lookup key for one rule table entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    /// Category
    pub tier1: Tier1,
    /// Section slug, if the entry is section- or page-level
    pub tier2: Option<String>,
    /// Page slug, if the entry is page-level
    pub tier3: Option<String>,
}

impl RuleKey {
    /// Category-level key
    pub fn category(tier1: Tier1) -> Self {
        Self {
            tier1,
            tier2: None,
            tier3: None,
        }
    }

    /// Section-level key
    pub fn section(tier1: Tier1, tier2: impl Into<String>) -> Self {
        Self {
            tier1,
            tier2: Some(tier2.into()),
            tier3: None,
        }
    }

    /// Page-level key
    pub fn page(tier1: Tier1, tier2: impl Into<String>, tier3: impl Into<String>) -> Self {
        Self {
            tier1,
            tier2: Some(tier2.into()),
            tier3: Some(tier3.into()),
        }
    }

    /// Candidate keys for a classified path, finest-first
    pub fn candidates(path: &TierPath) -> Vec<RuleKey> {
        let mut keys = Vec::new();
        let tier1 = match path.tier1 {
            Some(t1) => t1,
            None => return keys,
        };
        if let (Some(t2), Some(t3)) = (&path.tier2, &path.tier3) {
            keys.push(RuleKey::page(tier1, t2.clone(), t3.clone()));
        }
        if let Some(t2) = &path.tier2 {
            keys.push(RuleKey::section(tier1, t2.clone()));
        }
        keys.push(RuleKey::category(tier1));
        keys
    }
}

/// Immutable rule table with an override layer
pub struct RuleSet {
    base: HashMap<RuleKey, RenderingRule>,
    overrides: HashMap<RuleKey, RenderingRule>,
    default_rule: RenderingRule,
}

impl RuleSet {
    /// Build the rule set with the built-in base table and no overrides
    pub fn builtin() -> Self {
        Self {
            base: builtin_table(),
            overrides: HashMap::new(),
            default_rule: default_rule(),
        }
    }

    /// Add an override layer on top of the base table
    ///
    /// Overrides are a separate layer, never a mutation of the base:
    /// at each specificity level the override entry wins over the base
    /// entry, but an override can never shadow a more specific base entry.
    pub fn with_overrides(mut self, overrides: HashMap<RuleKey, RenderingRule>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve the rule for a classified path
    ///
    /// Always returns a rule: the most specific match wins, coarser
    /// levels are consulted only when the finer ones are absent, and a
    /// miss at every level (including the all-`None` triple) lands on the
    /// default rule.
    pub fn resolve(&self, path: &TierPath) -> &RenderingRule {
        for key in RuleKey::candidates(path) {
            if let Some(rule) = self.overrides.get(&key).or_else(|| self.base.get(&key)) {
                return rule;
            }
        }
        &self.default_rule
    }

    /// The designated default rule (unknown page)
    pub fn default_rule(&self) -> &RenderingRule {
        &self.default_rule
    }

    /// Every widget any rule (base, override, or default) references
    ///
    /// Used at startup to verify the renderer registry covers the table.
    pub fn widgets_in_use(&self) -> HashSet<WidgetId> {
        self.base
            .values()
            .chain(self.overrides.values())
            .map(|rule| rule.widget)
            .chain(std::iter::once(self.default_rule.widget))
            .collect()
    }

    /// Number of entries across base and override layers
    pub fn len(&self) -> usize {
        self.base.len() + self.overrides.len()
    }

    /// True when both layers are empty
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.overrides.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The designated "unknown page" rule
fn default_rule() -> RenderingRule {
    RenderingRule::new(WidgetId::GenericFallback).with_manifest(
        WidgetManifest::new()
            .with_field("summary", FieldKind::Narrative, TierLevel::One)
            .with_field("highlights", FieldKind::List, TierLevel::One),
    )
}

/// Manifest shared by category-level pages
fn category_manifest() -> WidgetManifest {
    WidgetManifest::new()
        .with_field("health_score", FieldKind::Metric, TierLevel::One)
        .with_field("summary", FieldKind::Narrative, TierLevel::One)
        .with_field("highlights", FieldKind::List, TierLevel::One)
}

/// Manifest shared by section-level pages
fn section_manifest() -> WidgetManifest {
    WidgetManifest::new()
        .with_field("health_score", FieldKind::Metric, TierLevel::One)
        .with_field("section_score", FieldKind::Metric, TierLevel::Two)
        .with_field("summary", FieldKind::Narrative, TierLevel::One)
        .with_field("kpis", FieldKind::List, TierLevel::Two)
}

/// Manifest for the full overview dashboard pages
fn overview_manifest() -> WidgetManifest {
    WidgetManifest::new()
        .with_field("health_score", FieldKind::Metric, TierLevel::One)
        .with_field("section_score", FieldKind::Metric, TierLevel::Two)
        .with_field("summary", FieldKind::Narrative, TierLevel::One)
        .with_field("kpis", FieldKind::List, TierLevel::Two)
        .with_field("insights", FieldKind::List, TierLevel::Three)
        .with_field("opportunities", FieldKind::List, TierLevel::Three)
        .with_field("next_steps", FieldKind::List, TierLevel::Three)
}

/// Built-in base table
///
/// Covers every tier-1 category, the OSA section of each, and the
/// overview dashboard pages. Anything finer degrades to the section- or
/// category-level entry by the resolution walk.
fn builtin_table() -> HashMap<RuleKey, RenderingRule> {
    let mut table = HashMap::new();

    let categories = [
        (
            Tier1::StrategyPlans,
            WidgetId::StrategyPlans,
            "strategy_workflow",
            vec!["cmp", "web-experimentation"],
        ),
        (
            Tier1::DxpTools,
            WidgetId::DxpTools,
            "dxp_tool_inventory",
            vec!["web-experimentation", "feature-experimentation", "data-platform", "cmp", "cms"],
        ),
        (
            Tier1::AnalyticsInsights,
            WidgetId::AnalyticsInsights,
            "insight_generator",
            vec!["data-platform"],
        ),
        (
            Tier1::ExperienceOptimization,
            WidgetId::ExperienceOptimization,
            "experiment_optimizer",
            vec!["web-experimentation", "feature-experimentation"],
        ),
    ];

    for (tier1, widget, agent, tools) in categories {
        table.insert(
            RuleKey::category(tier1),
            RenderingRule::new(widget)
                .with_agents([agent])
                .with_dxp_tools(tools.clone())
                .with_manifest(category_manifest()),
        );
        table.insert(
            RuleKey::section(tier1, "osa"),
            RenderingRule::new(widget)
                .with_agents([agent])
                .with_dxp_tools(tools.clone())
                .with_manifest(section_manifest()),
        );
        table.insert(
            RuleKey::page(tier1, "osa", "overview-dashboard"),
            RenderingRule::new(widget)
                .with_agents([agent])
                .with_dxp_tools(tools)
                .with_manifest(overview_manifest()),
        );
    }

    table
}
