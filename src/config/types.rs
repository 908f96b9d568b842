//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AssetGenResult;

use super::loader;
use super::ConfigWarning;

/// Hard-coded defaults, the lowest configuration tier
pub mod defaults {
    pub const OUTPUT_DIR: &str = "generated";
    pub const CLASS_NAME: &str = "Assets";
    pub const OUTPUT_FILENAME: &str = "assets";
    pub const SPLIT_PATTERN: &str = crate::domain::services::identifier::DEFAULT_SPLIT_PATTERN;
    pub const NAMED_WITH_PARENT: bool = true;
    pub const AUTO_DETECTION: bool = true;
    pub const PACKAGE_PARAMETER_ENABLED: bool = false;
    /// Auto-detection as read by the change snapshot when the key is unset
    pub const SNAPSHOT_AUTO_DETECTION: bool = false;
}

/// Global settings file (`<config_dir>/assetgen/config.toml`)
///
/// Every key is optional; unset keys fall through to the hard-coded defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub class_name: Option<String>,
    pub file_name: Option<String>,
    pub output_dir: Option<String>,
    pub filename_split_pattern: Option<String>,
    pub named_with_parent: Option<bool>,
    pub auto_detection: Option<bool>,
    pub package_parameter_enabled: Option<bool>,
    /// Flutter SDK used for version resolution
    pub flutter_sdk: Option<PathBuf>,
}

impl GlobalSettings {
    /// Load settings from a TOML file, ignoring unknown keys
    pub fn load(path: &Path) -> AssetGenResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load settings and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> AssetGenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}
