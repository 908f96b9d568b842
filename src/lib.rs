//! assetgen - strongly-typed Flutter asset accessors
//!
//! Scans the asset directories declared in each module's `pubspec.yaml`,
//! renders a Dart source file with one accessor per asset, and keeps that
//! file in sync while assets and manifests change.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{ConfigChangeCache, GenerateOptions, GenerateUseCase, WatchEvent, WatchUseCase};
pub use config::{GlobalSettings, ModuleConfig};
pub use domain::entities::AssetNode;
pub use domain::value_objects::{Capability, MediaType, SemanticVersion};
pub use error::{AssetGenError, AssetGenResult};
