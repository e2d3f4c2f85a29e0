//! OSA Domain Layer
//!
//! This crate contains the core domain model for the OSA rendering
//! pipeline. It defines the fundamental concepts, value objects, and trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **TierPath**: the `(tier1, tier2, tier3)` classification of one URL
//! - **TierData**: one tier-level payload with provenance and confidence
//! - **Confidence**: 0-100 score, banded by source (live > cache > fallback)
//! - **WidgetManifest**: the fields a widget expects, each with a kind
//! - **ResolvedContent**: fully populated widget input (Never Blank)
//! - **WidgetId**: closed identifier set for renderer dispatch
//!
//! ## Architecture
//!
//! - Pure domain logic only; no I/O
//! - Trait definitions for the upstream API and cache collaborators
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod manifest;
pub mod path;
pub mod resolved;
pub mod session;
pub mod tier;
pub mod tier_data;
pub mod traits;
pub mod widget;

// Re-exports for convenience
pub use confidence::Confidence;
pub use manifest::{FieldKind, FieldSpec, WidgetManifest};
pub use path::{TierKey, TierPath};
pub use resolved::{ResolvedContent, ResolvedField};
pub use session::SessionId;
pub use tier::{Tier1, TierLevel};
pub use tier_data::{DataSource, TierData, TierSet};
pub use widget::WidgetId;

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    proptest! {
        #[test]
        fn confidence_never_exceeds_100(v in any::<u8>()) {
            prop_assert!(Confidence::new(v).value() <= 100);
        }

        #[test]
        fn live_always_beats_cache_and_fallback(
            live_age in 0u64..100_000,
            cache_age in 0u64..100_000,
        ) {
            let live = Confidence::live(
                Duration::from_secs(live_age),
                Duration::from_secs(60),
            );
            let cached = Confidence::cached(
                Duration::from_secs(cache_age),
                Duration::from_secs(300),
            );
            prop_assert!(live > cached);
            prop_assert!(cached > Confidence::fallback());
        }

        #[test]
        fn placeholder_fields_are_never_blank(name in "[a-z_]{1,20}") {
            for kind in [FieldKind::Metric, FieldKind::List, FieldKind::Narrative] {
                let field = ResolvedField::placeholder(name.clone(), kind);
                prop_assert!(!resolved::is_blank(&field.value));
                prop_assert!(field.confidence.is_provisional());
            }
        }
    }
}
