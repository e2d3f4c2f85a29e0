//! OSA Routing Layer
//!
//! Path classification and rule resolution: the two pure lookup stages at
//! the front of the rendering pipeline.
//!
//! # Pipeline position
//!
//! Browser navigation hands this crate a URL path. [`classify`] turns it
//! into a `(tier1, tier2, tier3)` triple and [`RuleSet::resolve`] turns
//! the triple into a [`RenderingRule`] naming the widget, the upstream
//! agents, and the field manifest. Neither stage can fail: unknown paths
//! classify as generic and unknown triples resolve to the default rule.
//!
//! # Examples
//!
//! ```
//! use osa_routes::{classify, RuleSet};
//!
//! let rules = RuleSet::builtin();
//! let path = classify("/engine/results/strategy-plans/osa/overview-dashboard");
//! let rule = rules.resolve(&path);
//! assert_eq!(rule.required_agents, vec!["strategy_workflow"]);
//! ```

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod rule;
pub mod table;

pub use classifier::classify;
pub use config::{RulesConfig, RulesError};
pub use rule::RenderingRule;
pub use table::{RuleKey, RuleSet};

#[cfg(test)]
mod tests {
    use super::*;
    use osa_domain::WidgetId;

    #[test]
    fn test_classify_then_resolve_scenario() {
        let rules = RuleSet::builtin();
        let path = classify("/engine/results/strategy-plans/osa/overview-dashboard");
        let rule = rules.resolve(&path);
        assert_eq!(rule.widget, WidgetId::StrategyPlans);
        assert_eq!(rule.required_agents, vec!["strategy_workflow"]);
    }

    #[test]
    fn test_unknown_path_resolves_to_default() {
        let rules = RuleSet::builtin();
        let path = classify("/foo/bar");
        assert!(path.is_generic());
        assert_eq!(rules.resolve(&path).widget, WidgetId::GenericFallback);
    }
}
