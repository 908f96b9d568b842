//! Property tests for identifier sanitizing.

use proptest::prelude::*;

use assetgen::domain::services::identifier::is_dart_keyword;
use assetgen::domain::services::to_identifier;

fn is_legal(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Any file name sanitizes to a legal, non-keyword identifier.
    #[test]
    fn property_identifier_is_always_legal(raw in "\\PC{0,32}") {
        let identifier = to_identifier(&raw);
        prop_assert!(is_legal(&identifier), "{:?} -> {:?}", raw, identifier);
        prop_assert!(!is_dart_keyword(&identifier));
    }

    /// PROPERTY: Sanitizing an identifier again changes nothing.
    #[test]
    fn property_identifier_is_idempotent(raw in "[A-Za-z0-9_. @-]{0,24}") {
        let once = to_identifier(&raw);
        prop_assert_eq!(to_identifier(&once), once);
    }
}
