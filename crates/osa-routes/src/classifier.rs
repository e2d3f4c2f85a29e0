//! Path classifier
//!
//! Parses a URL pathname into a `(tier1, tier2, tier3)` triple. Pure and
//! infallible: the same path always yields the same triple, and a path
//! matching no known pattern yields the all-`None` triple rather than an
//! error.

use osa_domain::{Tier1, TierPath};

/// Classify a URL path into a tier triple
///
/// Recognized patterns, longest prefix first:
///
/// - `/engine/results/{tier1}/{tier2}/{tier3}` (canonical)
/// - `/results/{tier1}/{tier2}/{tier3}`
/// - `/{tier1}` legacy short forms (`/strategy`, `/strategy-plans`, ...)
///
/// Tier-1 slugs match the fixed vocabulary case-insensitively (legacy
/// aliases included); tier-2/tier-3 slugs are open but must be
/// well-formed. An unrecognized segment yields `None` for its tier and
/// every finer tier. Query strings, fragments, and trailing slashes are
/// ignored.
pub fn classify(path: &str) -> TierPath {
    let segments = normalize(path);

    match segments.as_slice() {
        [engine, results, rest @ ..] if engine == "engine" && results == "results" => {
            classify_tiers(rest)
        }
        [results, rest @ ..] if results == "results" => classify_tiers(rest),
        // Legacy short-form paths: a single segment naming a category
        [only] => match Tier1::parse(only) {
            Some(tier1) => TierPath::category(tier1),
            None => TierPath::generic(),
        },
        _ => TierPath::generic(),
    }
}

/// Split into lowercase segments, dropping query/fragment and empties
fn normalize(path: &str) -> Vec<String> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Classify the tier segments after a recognized prefix
fn classify_tiers(segments: &[String]) -> TierPath {
    let tier1 = match segments.first().and_then(|s| Tier1::parse(s)) {
        Some(tier1) => tier1,
        None => return TierPath::generic(),
    };

    let tier2 = segments.get(1).filter(|s| is_valid_slug(s));
    let tier2 = match tier2 {
        Some(slug) => slug.clone(),
        None => return TierPath::category(tier1),
    };

    // Segments beyond tier3 are finer than the pipeline models; ignore them
    match segments.get(2).filter(|s| is_valid_slug(s)) {
        Some(tier3) => TierPath::page(tier1, tier2, tier3.clone()),
        None => TierPath::section(tier1, tier2),
    }
}

/// Whether a segment is a well-formed slug (lowercase alphanumerics and
/// interior hyphens)
fn is_valid_slug(segment: &str) -> bool {
    !segment.is_empty()
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !segment.starts_with('-')
        && !segment.ends_with('-')
}
