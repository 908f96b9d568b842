//! Error types for assetgen
//!
//! Uses `thiserror` for library errors. Every variant is scoped to a single
//! module: callers report it and carry on with the sibling modules.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, ManifestWriteError};

/// Result type alias for assetgen operations
pub type AssetGenResult<T> = Result<T, AssetGenError>;

/// Main error type for assetgen operations
#[derive(Error, Debug)]
pub enum AssetGenError {
    /// The module directory has no `pubspec.yaml`
    #[error("no pubspec.yaml found in {module}")]
    ManifestNotFound { module: PathBuf },

    /// The manifest exists but could not be parsed
    #[error("invalid manifest {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Configured asset roots that do not exist (reported once per module)
    #[error("asset roots not found in {module}: {}", format_roots(.roots))]
    ScanRootMissing { module: PathBuf, roots: Vec<String> },

    /// The output file changed underneath us twice in a row
    #[error("{path} was modified concurrently, generated output not written")]
    WriteConflict { path: PathBuf },

    /// File system port failure
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Manifest writer collaborator failure
    #[error(transparent)]
    ManifestWrite(#[from] ManifestWriteError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing error (global settings)
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File watcher failure
    #[error("watch error: {0}")]
    Watch(String),
}

fn format_roots(roots: &[String]) -> String {
    roots.join(", ")
}

impl AssetGenError {
    /// Whether the failure only degrades output (the module still generated)
    pub fn is_warning(&self) -> bool {
        matches!(self, AssetGenError::ScanRootMissing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_config_parse() {
        let err = AssetGenError::ConfigParse {
            file: PathBuf::from("app/pubspec.yaml"),
            message: "mapping values are not allowed here".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid manifest app/pubspec.yaml: mapping values are not allowed here"
        );
    }

    #[test]
    fn test_error_display_missing_roots() {
        let err = AssetGenError::ScanRootMissing {
            module: PathBuf::from("app"),
            roots: vec!["assets/a/".to_string(), "assets/b/".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "asset roots not found in app: assets/a/, assets/b/"
        );
        assert!(err.is_warning());
    }

    #[test]
    fn test_error_display_write_conflict() {
        let err = AssetGenError::WriteConflict {
            path: PathBuf::from("lib/generated/assets.dart"),
        };
        assert!(err.to_string().contains("lib/generated/assets.dart"));
        assert!(!err.is_warning());
    }
}
