//! Property tests for dependency version selection.

use proptest::prelude::*;

use assetgen::domain::services::select_version;
use assetgen::domain::services::version_selector::rules_for;
use assetgen::{Capability, SemanticVersion};

fn version() -> impl Strategy<Value = SemanticVersion> {
    (0u32..5, 0u32..50, 0u32..10)
        .prop_map(|(major, minor, patch)| SemanticVersion::new(major, minor, patch))
}

fn capability() -> impl Strategy<Value = Capability> {
    prop_oneof![Just(Capability::Vector), Just(Capability::Animation)]
}

/// Position in the table; lower means a newer constraint
fn rank(capability: Capability, constraint: &str) -> usize {
    rules_for(capability)
        .iter()
        .position(|rule| rule.constraint == constraint)
        .unwrap_or(usize::MAX)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A known runtime always maps to a constraint from the table.
    #[test]
    fn property_known_runtime_uses_table(cap in capability(), runtime in version()) {
        let constraint = select_version(cap, Some(runtime));
        prop_assert!(rank(cap, constraint) != usize::MAX);
    }

    /// PROPERTY: A newer runtime never gets an older constraint.
    #[test]
    fn property_selection_is_monotonic(cap in capability(), a in version(), b in version()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_rank = rank(cap, select_version(cap, Some(low)));
        let high_rank = rank(cap, select_version(cap, Some(high)));
        prop_assert!(high_rank <= low_rank);
    }
}
