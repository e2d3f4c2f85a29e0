//! OSA Resolution Layer
//!
//! Confidence-scored fallback resolution: turns raw tier records plus a
//! widget field manifest into fully populated `ResolvedContent`,
//! enforcing the Never Blank rule. This stage cannot fail; every failure
//! upstream of it has already been converted into fallback records, and
//! every gap becomes a placeholder here.

#![warn(missing_docs)]

pub mod resolver;

pub use resolver::resolve_content;

#[cfg(test)]
mod property_tests {
    use super::*;
    use osa_domain::resolved::is_blank;
    use osa_domain::{Confidence, FieldKind, TierData, TierLevel, TierSet, WidgetManifest};
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_kind() -> impl Strategy<Value = FieldKind> {
        prop_oneof![
            Just(FieldKind::Metric),
            Just(FieldKind::List),
            Just(FieldKind::Narrative),
        ]
    }

    fn arb_level() -> impl Strategy<Value = TierLevel> {
        prop_oneof![
            Just(TierLevel::One),
            Just(TierLevel::Two),
            Just(TierLevel::Three),
        ]
    }

    proptest! {
        /// Never Blank: whatever subset of tiers has data, every manifest
        /// field resolves to a non-blank value.
        #[test]
        fn no_field_is_ever_blank(
            fields in proptest::collection::vec(
                ("[a-z_]{1,12}", arb_kind(), arb_level()),
                0..8,
            ),
            tier1_present in any::<bool>(),
            tier2_present in any::<bool>(),
            tier3_present in any::<bool>(),
        ) {
            let manifest: WidgetManifest = fields
                .iter()
                .cloned()
                .fold(WidgetManifest::new(), |m, (name, kind, level)| {
                    m.with_field(name, kind, level)
                });

            let mut tiers = TierSet::all_fallback();
            for (level, present) in [
                (TierLevel::One, tier1_present),
                (TierLevel::Two, tier2_present),
                (TierLevel::Three, tier3_present),
            ] {
                if present {
                    tiers.set(TierData::live(
                        level,
                        json!({"health_score": 87}),
                        Confidence::new(95),
                    ));
                }
            }

            let content = resolve_content(&manifest, &tiers);
            prop_assert_eq!(content.fields().len(), manifest.fields().len());
            for field in content.fields() {
                prop_assert!(!is_blank(&field.value));
            }
        }

        /// Confidence monotonicity: a field resolved from live data never
        /// scores below the same field resolved by fallback substitution.
        #[test]
        fn live_resolution_outranks_fallback(name in "[a-z_]{1,12}", kind in arb_kind()) {
            let manifest = WidgetManifest::new().with_field(name.clone(), kind, TierLevel::One);

            let mut payload = serde_json::Map::new();
            payload.insert(name.clone(), json!("value"));

            let mut live_tiers = TierSet::all_fallback();
            live_tiers.set(TierData::live(
                TierLevel::One,
                serde_json::Value::Object(payload),
                Confidence::new(95),
            ));
            let live = resolve_content(&manifest, &live_tiers);
            let fallback = resolve_content(&manifest, &TierSet::all_fallback());

            prop_assert!(
                live.get(&name).unwrap().confidence >= fallback.get(&name).unwrap().confidence
            );
        }
    }
}
