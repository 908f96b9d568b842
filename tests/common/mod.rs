//! Common test utilities for assetgen CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Fixtures: Reusable manifest and asset content

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
