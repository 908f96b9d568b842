//! Property tests for assetgen.
//!
//! Properties use randomized input generation to protect invariants of the
//! pure services: identifiers are always legal and selection is monotonic.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/identifier.rs"]
mod identifier;

#[path = "properties/version_selector.rs"]
mod version_selector;
