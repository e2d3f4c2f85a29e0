//! Resolved content
//!
//! `ResolvedContent` is the shape a widget actually renders: every
//! manifest field populated with either real data or a kind-appropriate
//! placeholder, each carrying its own confidence score and provenance.
//! The Never Blank rule lives here as a structural invariant: a
//! `ResolvedField` cannot hold a null, empty-string, or empty-array value.

use crate::confidence::Confidence;
use crate::manifest::FieldKind;
use crate::tier_data::DataSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One populated widget field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedField {
    /// Manifest field name
    pub name: String,
    /// Content kind
    pub kind: FieldKind,
    /// The value to render; never null/empty
    pub value: Value,
    /// Confidence in this specific value
    pub confidence: Confidence,
    /// Where the value came from
    pub source: DataSource,
}

impl ResolvedField {
    /// Create a resolved field
    ///
    /// Blank values (JSON null, empty string, empty array) are replaced
    /// by the kind's placeholder with provisional confidence, so a blank
    /// can never be constructed even by a careless caller.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        value: Value,
        confidence: Confidence,
        source: DataSource,
    ) -> Self {
        if is_blank(&value) {
            return Self::placeholder(name, kind);
        }
        Self {
            name: name.into(),
            kind,
            value,
            confidence,
            source,
        }
    }

    /// Placeholder field for missing data
    pub fn placeholder(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: kind.placeholder(),
            confidence: Confidence::fallback().clamp_provisional(),
            source: DataSource::Fallback,
        }
    }

    /// True when this field holds substituted placeholder content
    pub fn is_placeholder(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

/// Whether a JSON value counts as blank for the Never Blank rule
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Fully resolved content for one widget render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedContent {
    fields: Vec<ResolvedField>,
    page_confidence: Confidence,
}

impl ResolvedContent {
    /// Build content from resolved fields
    ///
    /// Page confidence is the minimum over field confidences: a page is
    /// only as trustworthy as its weakest field. An empty field set takes
    /// fallback-band confidence.
    pub fn new(fields: Vec<ResolvedField>) -> Self {
        let page_confidence = fields
            .iter()
            .map(|f| f.confidence)
            .min()
            .unwrap_or_else(Confidence::fallback);
        Self {
            fields,
            page_confidence,
        }
    }

    /// Resolved fields, in manifest order
    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Aggregate page-level confidence (minimum over fields)
    pub fn page_confidence(&self) -> Confidence {
        self.page_confidence
    }

    /// True when the page should show the "data still building" banner
    pub fn is_building(&self) -> bool {
        self.page_confidence.is_building()
    }

    /// Fields of a given kind, in manifest order
    pub fn fields_of_kind(&self, kind: FieldKind) -> Vec<&ResolvedField> {
        self.fields.iter().filter(|f| f.kind == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!("   ")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!("text")));
        assert!(!is_blank(&json!(["item"])));
    }

    #[test]
    fn test_blank_value_becomes_placeholder() {
        let field = ResolvedField::new(
            "summary",
            FieldKind::Narrative,
            Value::Null,
            Confidence::new(95),
            DataSource::Live,
        );
        assert!(field.is_placeholder());
        assert!(field.confidence.is_provisional());
        assert!(!is_blank(&field.value));
    }

    #[test]
    fn test_live_field_kept() {
        let field = ResolvedField::new(
            "health_score",
            FieldKind::Metric,
            json!(87),
            Confidence::new(95),
            DataSource::Live,
        );
        assert!(!field.is_placeholder());
        assert_eq!(field.value, json!(87));
    }

    #[test]
    fn test_page_confidence_is_minimum() {
        let content = ResolvedContent::new(vec![
            ResolvedField::new(
                "a",
                FieldKind::Metric,
                json!(1),
                Confidence::new(95),
                DataSource::Live,
            ),
            ResolvedField::placeholder("b", FieldKind::List),
            ResolvedField::new(
                "c",
                FieldKind::Narrative,
                json!("ok"),
                Confidence::new(70),
                DataSource::Cache,
            ),
        ]);
        assert_eq!(content.page_confidence(), Confidence::fallback());
        assert!(content.is_building());
    }

    #[test]
    fn test_all_live_page_not_building() {
        let content = ResolvedContent::new(vec![ResolvedField::new(
            "a",
            FieldKind::Metric,
            json!(1),
            Confidence::new(95),
            DataSource::Live,
        )]);
        assert!(!content.is_building());
    }

    #[test]
    fn test_empty_content_is_building() {
        let content = ResolvedContent::new(Vec::new());
        assert!(content.is_building());
        assert_eq!(content.page_confidence(), Confidence::fallback());
    }

    #[test]
    fn test_lookup_and_kind_filter() {
        let content = ResolvedContent::new(vec![
            ResolvedField::new(
                "score",
                FieldKind::Metric,
                json!(42),
                Confidence::new(95),
                DataSource::Live,
            ),
            ResolvedField::placeholder("insights", FieldKind::List),
        ]);
        assert!(content.get("score").is_some());
        assert!(content.get("missing").is_none());
        assert_eq!(content.fields_of_kind(FieldKind::List).len(), 1);
    }
}
