//! Pipeline composition
//!
//! The engine wires the five pipeline stages together: classify the
//! path, resolve the rendering rule, fetch the tiers, resolve the
//! content, render the widget. Construction verifies that every widget
//! the rule table references has a registered renderer, so a
//! misconfigured table fails at startup rather than mid-render.
//!
//! Rendering itself never fails: every stage past construction degrades
//! instead of erroring.

use crate::config::EngineConfig;
use crate::EngineError;
use osa_domain::traits::TierEndpoint;
use osa_domain::{ResolvedContent, TierPath, WidgetId};
use osa_fetch::{FetcherConfig, HttpTierEndpoint, MemoryTierCache, TierFetcher};
use osa_resolve::resolve_content;
use osa_routes::{classify, RuleSet, RulesConfig};
use osa_widgets::{RenderNode, WidgetRegistry};
use std::sync::Arc;
use std::time::SystemTime;

/// One complete render of one page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The classified tier path
    pub path: TierPath,
    /// The widget the rule table selected
    pub widget: WidgetId,
    /// Fully resolved widget input (Never Blank)
    pub content: ResolvedContent,
    /// The render tree
    pub node: RenderNode,
    /// When this render completed
    pub rendered_at: SystemTime,
}

/// The assembled rendering pipeline
///
/// Generic over the tier endpoint so tests can drive it with a mock.
/// Cheap to clone; clones share the rule table, the fetcher (and its
/// cache and in-flight map), and the renderer registry.
pub struct Engine<E: TierEndpoint> {
    rules: Arc<RuleSet>,
    fetcher: Arc<TierFetcher<E>>,
    registry: Arc<WidgetRegistry>,
}

impl<E: TierEndpoint> Clone for Engine<E> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            fetcher: Arc::clone(&self.fetcher),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: TierEndpoint> Engine<E> {
    /// Assemble an engine, verifying registry coverage of the rule table
    pub fn new(
        rules: RuleSet,
        fetcher: TierFetcher<E>,
        registry: WidgetRegistry,
    ) -> Result<Self, EngineError> {
        registry.verify(rules.widgets_in_use())?;
        Ok(Self {
            rules: Arc::new(rules),
            fetcher: Arc::new(fetcher),
            registry: Arc::new(registry),
        })
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The fetcher configuration in use
    pub fn config(&self) -> &FetcherConfig {
        self.fetcher.config()
    }

    /// Render one page from a raw URL path
    pub async fn render_page(&self, raw_path: &str) -> RenderedPage {
        self.render_inner(raw_path, false).await
    }

    /// Re-render one page, bypassing the cache read path
    pub async fn refresh_page(&self, raw_path: &str) -> RenderedPage {
        self.render_inner(raw_path, true).await
    }

    async fn render_inner(&self, raw_path: &str, bypass_cache: bool) -> RenderedPage {
        let path = classify(raw_path);
        let rule = self.rules.resolve(&path);
        tracing::debug!(path = %path, widget = %rule.widget, "rendering page");

        let tiers = if bypass_cache {
            self.fetcher.refresh_all(&path, &rule.manifest).await
        } else {
            self.fetcher.fetch_all(&path, &rule.manifest).await
        };

        let content = resolve_content(&rule.manifest, &tiers);
        let node = self.registry.render(rule.widget, &content);

        tracing::info!(
            path = %path,
            widget = %rule.widget,
            confidence = content.page_confidence().value(),
            "page rendered"
        );

        RenderedPage {
            path,
            widget: rule.widget,
            content,
            node,
            rendered_at: SystemTime::now(),
        }
    }
}

impl Engine<HttpTierEndpoint> {
    /// Assemble the production engine from configuration
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let rules = match &config.rules_overrides {
            Some(path) => {
                let overrides = RulesConfig::from_file(path)?.into_overrides()?;
                tracing::info!(count = overrides.len(), "loaded rule overrides");
                RuleSet::builtin().with_overrides(overrides)
            }
            None => RuleSet::builtin(),
        };

        let endpoint = HttpTierEndpoint::from_config(&config.fetcher)?;
        let cache = Arc::new(MemoryTierCache::new(config.fetcher.cache_ttl()));
        let fetcher = TierFetcher::new(endpoint, cache, config.fetcher);

        Self::new(rules, fetcher, WidgetRegistry::with_defaults())
    }
}
