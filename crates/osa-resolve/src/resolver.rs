//! Content resolution
//!
//! The last line of defense against blank UI. Given the three tier
//! records and a widget's field manifest, produce `ResolvedContent` where
//! every manifest field is populated: from tier data when present, from a
//! kind-appropriate placeholder when not. This function is total; it has
//! no error path.

use osa_domain::resolved::is_blank;
use osa_domain::{ResolvedContent, ResolvedField, TierSet, WidgetManifest};

/// Resolve a widget's manifest against the fetched tier records
///
/// Per field: look up the field name in the payload of the tier the
/// manifest declares; a present, non-blank value is kept with the tier
/// record's confidence and provenance, anything else becomes the kind's
/// placeholder at provisional confidence. The output always has exactly
/// one resolved field per manifest field, in manifest order.
pub fn resolve_content(manifest: &WidgetManifest, tiers: &TierSet) -> ResolvedContent {
    let fields = manifest
        .fields()
        .iter()
        .map(|spec| {
            let tier = tiers.get(spec.level);
            let value = tier
                .payload
                .as_ref()
                .and_then(|payload| payload.get(&spec.name))
                .filter(|value| !is_blank(value));

            match value {
                Some(value) => ResolvedField::new(
                    spec.name.clone(),
                    spec.kind,
                    value.clone(),
                    tier.confidence,
                    tier.source,
                ),
                None => {
                    tracing::debug!(
                        field = %spec.name,
                        level = tier.level.as_str(),
                        "field missing from tier payload, substituting placeholder"
                    );
                    ResolvedField::placeholder(spec.name.clone(), spec.kind)
                }
            }
        })
        .collect();

    ResolvedContent::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osa_domain::{
        Confidence, DataSource, FieldKind, TierData, TierLevel, WidgetManifest,
    };
    use serde_json::json;

    fn manifest() -> WidgetManifest {
        WidgetManifest::new()
            .with_field("health_score", FieldKind::Metric, TierLevel::One)
            .with_field("kpis", FieldKind::List, TierLevel::Two)
            .with_field("insights", FieldKind::List, TierLevel::Three)
            .with_field("summary", FieldKind::Narrative, TierLevel::One)
    }

    fn live(level: TierLevel, payload: serde_json::Value) -> TierData {
        TierData::live(level, payload, Confidence::new(95))
    }

    #[test]
    fn test_all_tiers_live() {
        let mut tiers = TierSet::all_fallback();
        tiers.set(live(
            TierLevel::One,
            json!({"health_score": 87, "summary": "On track"}),
        ));
        tiers.set(live(TierLevel::Two, json!({"kpis": ["conversion", "reach"]})));
        tiers.set(live(TierLevel::Three, json!({"insights": ["a", "b"]})));

        let content = resolve_content(&manifest(), &tiers);
        assert_eq!(content.fields().len(), 4);
        assert!(content.fields().iter().all(|f| !f.is_placeholder()));
        assert!(!content.is_building());
        assert_eq!(content.get("health_score").unwrap().value, json!(87));
    }

    #[test]
    fn test_failed_tier3_gets_placeholders_only_for_tier3_fields() {
        let mut tiers = TierSet::all_fallback();
        tiers.set(live(
            TierLevel::One,
            json!({"health_score": 87, "summary": "On track"}),
        ));
        tiers.set(live(TierLevel::Two, json!({"kpis": ["conversion"]})));
        // tier3 stays a fallback record

        let content = resolve_content(&manifest(), &tiers);

        let insights = content.get("insights").unwrap();
        assert!(insights.is_placeholder());
        assert!(insights.confidence.is_provisional());

        let kpis = content.get("kpis").unwrap();
        assert!(!kpis.is_placeholder());
        assert_eq!(kpis.source, DataSource::Live);
        assert!(kpis.confidence > insights.confidence);
    }

    #[test]
    fn test_never_blank_with_no_data_at_all() {
        let content = resolve_content(&manifest(), &TierSet::all_fallback());
        assert_eq!(content.fields().len(), 4);
        for field in content.fields() {
            assert!(field.is_placeholder());
            assert!(!is_blank(&field.value));
        }
        assert!(content.is_building());
    }

    #[test]
    fn test_null_field_in_live_payload_becomes_placeholder() {
        let mut tiers = TierSet::all_fallback();
        tiers.set(live(
            TierLevel::One,
            json!({"health_score": null, "summary": ""}),
        ));

        let content = resolve_content(&manifest(), &tiers);
        assert!(content.get("health_score").unwrap().is_placeholder());
        assert!(content.get("summary").unwrap().is_placeholder());
    }

    #[test]
    fn test_empty_list_becomes_placeholder() {
        let mut tiers = TierSet::all_fallback();
        tiers.set(live(TierLevel::Two, json!({"kpis": []})));

        let content = resolve_content(&manifest(), &tiers);
        let kpis = content.get("kpis").unwrap();
        assert!(kpis.is_placeholder());
        assert_eq!(kpis.value, json!(["Data collection in progress"]));
    }

    #[test]
    fn test_placeholder_text_by_kind() {
        let content = resolve_content(&manifest(), &TierSet::all_fallback());
        assert_eq!(
            content.get("health_score").unwrap().value,
            json!("Calculating…")
        );
        assert_eq!(
            content.get("summary").unwrap().value,
            json!("Building confidence — initial data collection phase")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut tiers = TierSet::all_fallback();
        tiers.set(live(TierLevel::One, json!({"health_score": 42})));

        let first = resolve_content(&manifest(), &tiers);
        let second = resolve_content(&manifest(), &tiers);
        assert_eq!(first.page_confidence(), second.page_confidence());
        assert_eq!(first.fields().len(), second.fields().len());
        for (a, b) in first.fields().iter().zip(second.fields()) {
            assert_eq!(a.value, b.value);
            assert_eq!(a.confidence, b.confidence);
        }
    }

    #[test]
    fn test_empty_manifest_is_building() {
        let content = resolve_content(&WidgetManifest::new(), &TierSet::all_fallback());
        assert!(content.fields().is_empty());
        assert!(content.is_building());
    }
}
