//! Render tree model
//!
//! Widgets render into a framework-neutral tree of nodes. The tree is
//! serializable, so the embedding application (web frontend, CLI, test
//! harness) decides how to materialize it. Confidence annotations ride
//! along on every leaf so provisional content can be styled differently
//! from authoritative content.

use osa_domain::{FieldKind, ResolvedField};
use serde::Serialize;
use serde_json::Value;

/// One node of a rendered widget tree
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    /// Root of one widget render
    Page {
        /// Widget identifier string
        widget: String,
        /// Aggregate page confidence (0-100)
        confidence: u8,
        /// Whether to show the "data still building" banner
        building: bool,
        /// Page content
        children: Vec<RenderNode>,
    },
    /// Titled grouping of child nodes
    Section {
        /// Section heading
        title: String,
        /// Section content
        children: Vec<RenderNode>,
    },
    /// Single scalar value
    Metric {
        /// Display label
        label: String,
        /// The value (number or placeholder text)
        value: Value,
        /// Field confidence (0-100)
        confidence: u8,
        /// Whether the value is placeholder-grade
        provisional: bool,
    },
    /// List of items
    List {
        /// Display label
        label: String,
        /// List items
        items: Vec<Value>,
        /// Field confidence (0-100)
        confidence: u8,
        /// Whether the items are placeholder-grade
        provisional: bool,
    },
    /// Prose block
    Narrative {
        /// The text
        text: String,
        /// Field confidence (0-100)
        confidence: u8,
        /// Whether the text is placeholder-grade
        provisional: bool,
    },
    /// Inline error state for one failed widget slot
    InlineError {
        /// Widget identifier string
        widget: String,
        /// Short, non-alarming notice
        message: String,
    },
}

impl RenderNode {
    /// Leaf node for one resolved field, shaped by its kind
    pub fn from_field(field: &ResolvedField) -> RenderNode {
        let confidence = field.confidence.value();
        let provisional = field.confidence.is_provisional();
        match field.kind {
            FieldKind::Metric => RenderNode::Metric {
                label: display_label(&field.name),
                value: field.value.clone(),
                confidence,
                provisional,
            },
            FieldKind::List => RenderNode::List {
                label: display_label(&field.name),
                items: match &field.value {
                    Value::Array(items) => items.clone(),
                    other => vec![other.clone()],
                },
                confidence,
                provisional,
            },
            FieldKind::Narrative => RenderNode::Narrative {
                text: match &field.value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
                confidence,
                provisional,
            },
        }
    }
}

/// Turn a payload key into a display label ("health_score" -> "Health score")
fn display_label(name: &str) -> String {
    let mut label = name.replace(['_', '-'], " ");
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    label
}
