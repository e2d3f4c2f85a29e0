//! Built-in widget renderers
//!
//! One renderer per widget identifier. All of them are pure functions of
//! `ResolvedContent`: narratives first, metrics grouped into a hero
//! section, lists grouped into a detail section. The section titles are
//! what distinguish the dashboards; the composition logic is shared.

use crate::node::RenderNode;
use crate::registry::{RenderError, WidgetRenderer};
use osa_domain::{FieldKind, ResolvedContent, WidgetId};

/// All built-in renderers, one per widget identifier
pub fn default_renderers() -> Vec<Box<dyn WidgetRenderer>> {
    vec![
        Box::new(StrategyPlansRenderer),
        Box::new(DxpToolsRenderer),
        Box::new(AnalyticsInsightsRenderer),
        Box::new(ExperienceOptimizationRenderer),
        Box::new(GenericFallbackRenderer),
    ]
}

/// Shared page composition: narratives, then a metrics section, then a
/// lists section. Sections with no fields are omitted entirely.
fn compose_page(
    widget: WidgetId,
    content: &ResolvedContent,
    metrics_title: &str,
    lists_title: &str,
) -> RenderNode {
    let mut children: Vec<RenderNode> = content
        .fields_of_kind(FieldKind::Narrative)
        .into_iter()
        .map(RenderNode::from_field)
        .collect();

    let metrics: Vec<RenderNode> = content
        .fields_of_kind(FieldKind::Metric)
        .into_iter()
        .map(RenderNode::from_field)
        .collect();
    if !metrics.is_empty() {
        children.push(RenderNode::Section {
            title: metrics_title.to_string(),
            children: metrics,
        });
    }

    let lists: Vec<RenderNode> = content
        .fields_of_kind(FieldKind::List)
        .into_iter()
        .map(RenderNode::from_field)
        .collect();
    if !lists.is_empty() {
        children.push(RenderNode::Section {
            title: lists_title.to_string(),
            children: lists,
        });
    }

    RenderNode::Page {
        widget: widget.as_str().to_string(),
        confidence: content.page_confidence().value(),
        building: content.is_building(),
        children,
    }
}

/// Strategy plans dashboard
pub struct StrategyPlansRenderer;

impl WidgetRenderer for StrategyPlansRenderer {
    fn widget(&self) -> WidgetId {
        WidgetId::StrategyPlans
    }

    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError> {
        Ok(compose_page(
            self.widget(),
            content,
            "Strategy health",
            "Plans and next steps",
        ))
    }
}

/// DXP tool inventory dashboard
pub struct DxpToolsRenderer;

impl WidgetRenderer for DxpToolsRenderer {
    fn widget(&self) -> WidgetId {
        WidgetId::DxpTools
    }

    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError> {
        Ok(compose_page(
            self.widget(),
            content,
            "Tool coverage",
            "Tool activity",
        ))
    }
}

/// Analytics and insights dashboard
pub struct AnalyticsInsightsRenderer;

impl WidgetRenderer for AnalyticsInsightsRenderer {
    fn widget(&self) -> WidgetId {
        WidgetId::AnalyticsInsights
    }

    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError> {
        Ok(compose_page(
            self.widget(),
            content,
            "Signal strength",
            "Insights",
        ))
    }
}

/// Experimentation dashboard
pub struct ExperienceOptimizationRenderer;

impl WidgetRenderer for ExperienceOptimizationRenderer {
    fn widget(&self) -> WidgetId {
        WidgetId::ExperienceOptimization
    }

    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError> {
        Ok(compose_page(
            self.widget(),
            content,
            "Experiment velocity",
            "Opportunities",
        ))
    }
}

/// Generic widget for unknown or unmapped pages
///
/// Renders fields flat in manifest order, with no section grouping;
/// there is nothing domain-specific to organize around.
pub struct GenericFallbackRenderer;

impl WidgetRenderer for GenericFallbackRenderer {
    fn widget(&self) -> WidgetId {
        WidgetId::GenericFallback
    }

    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError> {
        Ok(RenderNode::Page {
            widget: self.widget().as_str().to_string(),
            confidence: content.page_confidence().value(),
            building: content.is_building(),
            children: content.fields().iter().map(RenderNode::from_field).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osa_domain::{Confidence, DataSource, ResolvedField};
    use serde_json::json;

    fn rich_content() -> ResolvedContent {
        ResolvedContent::new(vec![
            ResolvedField::new(
                "summary",
                FieldKind::Narrative,
                json!("Pipeline healthy"),
                Confidence::new(95),
                DataSource::Live,
            ),
            ResolvedField::new(
                "health_score",
                FieldKind::Metric,
                json!(87),
                Confidence::new(95),
                DataSource::Live,
            ),
            ResolvedField::new(
                "insights",
                FieldKind::List,
                json!(["a", "b"]),
                Confidence::new(92),
                DataSource::Live,
            ),
        ])
    }

    fn children_of(node: &RenderNode) -> &[RenderNode] {
        match node {
            RenderNode::Page { children, .. } => children,
            other => panic!("expected page node, got {:?}", other),
        }
    }

    #[test]
    fn test_compose_order_narrative_metrics_lists() {
        let node = StrategyPlansRenderer.render(&rich_content()).unwrap();
        let children = children_of(&node);
        assert_eq!(children.len(), 3);
        assert!(matches!(children[0], RenderNode::Narrative { .. }));
        assert!(matches!(children[1], RenderNode::Section { .. }));
        assert!(matches!(children[2], RenderNode::Section { .. }));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let content = ResolvedContent::new(vec![ResolvedField::new(
            "summary",
            FieldKind::Narrative,
            json!("Only prose"),
            Confidence::new(95),
            DataSource::Live,
        )]);
        let node = DxpToolsRenderer.render(&content).unwrap();
        assert_eq!(children_of(&node).len(), 1);
    }

    #[test]
    fn test_page_carries_confidence_and_banner() {
        let content = ResolvedContent::new(vec![ResolvedField::placeholder(
            "summary",
            FieldKind::Narrative,
        )]);
        let node = GenericFallbackRenderer.render(&content).unwrap();
        match node {
            RenderNode::Page {
                confidence,
                building,
                ..
            } => {
                assert!(confidence <= 35);
                assert!(building);
            }
            other => panic!("expected page node, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_renders_flat() {
        let node = GenericFallbackRenderer.render(&rich_content()).unwrap();
        let children = children_of(&node);
        assert_eq!(children.len(), 3);
        assert!(children
            .iter()
            .all(|c| !matches!(c, RenderNode::Section { .. })));
    }

    #[test]
    fn test_every_default_renderer_handles_empty_content() {
        let empty = ResolvedContent::new(Vec::new());
        for renderer in default_renderers() {
            let node = renderer.render(&empty).unwrap();
            assert!(matches!(node, RenderNode::Page { .. }));
        }
    }
}
