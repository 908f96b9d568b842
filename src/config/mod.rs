//! Configuration module for assetgen
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags (`--flutter-sdk`)
//! 2. Per-module `flutter_assets_generator` section in `pubspec.yaml`
//! 3. Environment variables (`ASSETGEN_*`, `FLUTTER_ROOT`)
//! 4. Global settings (`<config_dir>/assetgen/config.toml`)
//! 5. Built-in defaults

mod loader;
mod manifest;
mod module;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_env, load_or_default, settings_path, with_env_overrides, AUTO_DETECTION_ENV,
    CONFIG_ENV, FLUTTER_ROOT_ENV, FLUTTER_SDK_ENV,
};
pub use manifest::{
    AssetEntry, Environment, FlutterSection, GeneratorSection, PubspecManifest,
    GENERATOR_SECTION,
};
pub use module::{ModuleConfig, MANIFEST_FILE};
pub use types::{defaults, GlobalSettings};
