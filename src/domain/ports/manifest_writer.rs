//! ManifestWriter port - the boundary where new dependencies leave the core
//!
//! Generation decides *which* packages the rendered code relies on; adding
//! them to the manifest and fetching them belongs to the collaborator behind
//! this trait.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// What the collaborator did with a dependency request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyRequestStatus {
    /// Entries were added and packages fetched
    Installed,
    /// The request was recorded for the user to act on
    Reported,
}

/// Manifest writer errors
#[derive(Debug, Error)]
pub enum ManifestWriteError {
    /// The package manager could not be started
    #[error("failed to run package manager in {}: {source}", .module.display())]
    Spawn {
        module: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The package manager ran and failed
    #[error("package manager failed in {}: {message}", .module.display())]
    Failed { module: PathBuf, message: String },
}

/// Receives `package -> version constraint` maps for a module
pub trait ManifestWriter {
    /// Add the given dependencies (idempotently) and fetch them
    fn request_dependencies(
        &self,
        module_root: &Path,
        manifest: &Path,
        dependencies: &BTreeMap<String, String>,
    ) -> Result<DependencyRequestStatus, ManifestWriteError>;
}

impl<T: ManifestWriter + ?Sized> ManifestWriter for &T {
    fn request_dependencies(
        &self,
        module_root: &Path,
        manifest: &Path,
        dependencies: &BTreeMap<String, String>,
    ) -> Result<DependencyRequestStatus, ManifestWriteError> {
        (**self).request_dependencies(module_root, manifest, dependencies)
    }
}
