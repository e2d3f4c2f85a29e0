//! Widget identifiers
//!
//! Widgets are identified by a closed enum rather than free-form strings,
//! so the renderer registry can be verified against the rule table at
//! startup: every widget a rule references must have a registered
//! renderer, checked once when the engine is built.

use serde::{Deserialize, Serialize};

/// Identifier of a presentational widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetId {
    /// Strategy plans dashboard
    StrategyPlans,
    /// DXP tool inventory
    DxpTools,
    /// Analytics and insights reporting
    AnalyticsInsights,
    /// Experimentation overview
    ExperienceOptimization,
    /// Generic widget shown for unknown or unmapped pages
    GenericFallback,
}

impl WidgetId {
    /// Get the widget identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetId::StrategyPlans => "strategy-plans",
            WidgetId::DxpTools => "dxp-tools",
            WidgetId::AnalyticsInsights => "analytics-insights",
            WidgetId::ExperienceOptimization => "experience-optimization",
            WidgetId::GenericFallback => "generic-fallback",
        }
    }

    /// Parse a widget identifier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strategy-plans" => Some(WidgetId::StrategyPlans),
            "dxp-tools" => Some(WidgetId::DxpTools),
            "analytics-insights" => Some(WidgetId::AnalyticsInsights),
            "experience-optimization" => Some(WidgetId::ExperienceOptimization),
            "generic-fallback" => Some(WidgetId::GenericFallback),
            _ => None,
        }
    }

    /// All widget identifiers
    pub fn all() -> [WidgetId; 5] {
        [
            WidgetId::StrategyPlans,
            WidgetId::DxpTools,
            WidgetId::AnalyticsInsights,
            WidgetId::ExperienceOptimization,
            WidgetId::GenericFallback,
        ]
    }
}

impl std::str::FromStr for WidgetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown widget: {}", s))
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
