use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::ports::{DependencyRequestStatus, ManifestWriteError, ManifestWriter};

/// One recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    pub module_root: PathBuf,
    pub dependencies: BTreeMap<String, String>,
}

/// `flutter pub add` invocation equivalent to a request
pub fn pub_add_command(dependencies: &BTreeMap<String, String>) -> String {
    let packages: Vec<String> = dependencies
        .iter()
        .map(|(package, constraint)| format!("'{}:{}'", package, constraint))
        .collect();
    format!("flutter pub add {}", packages.join(" "))
}

/// Records requests and logs the command the user should run
#[derive(Debug, Default)]
pub struct ReportingManifestWriter {
    requests: Mutex<Vec<DependencyRequest>>,
}

impl ReportingManifestWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests recorded so far
    pub fn requests(&self) -> Vec<DependencyRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ManifestWriter for ReportingManifestWriter {
    fn request_dependencies(
        &self,
        module_root: &Path,
        _manifest: &Path,
        dependencies: &BTreeMap<String, String>,
    ) -> Result<DependencyRequestStatus, ManifestWriteError> {
        if dependencies.is_empty() {
            return Ok(DependencyRequestStatus::Reported);
        }
        info!(
            module = %module_root.display(),
            command = %pub_add_command(dependencies),
            "dependencies required by generated code"
        );
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DependencyRequest {
                module_root: module_root.to_path_buf(),
                dependencies: dependencies.clone(),
            });
        Ok(DependencyRequestStatus::Reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_requests() {
        let writer = ReportingManifestWriter::new();
        let deps: BTreeMap<String, String> = [("flutter_svg".to_string(), "^2.0.10".to_string())]
            .into_iter()
            .collect();

        let status = writer
            .request_dependencies(Path::new("/app"), Path::new("/app/pubspec.yaml"), &deps)
            .unwrap();

        assert_eq!(status, DependencyRequestStatus::Reported);
        assert_eq!(writer.requests().len(), 1);
        assert_eq!(writer.requests()[0].dependencies, deps);
    }

    #[test]
    fn command_lists_packages_in_order() {
        let deps: BTreeMap<String, String> = [
            ("lottie".to_string(), "^3.1.0".to_string()),
            ("flutter_svg".to_string(), "^2.0.10".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            pub_add_command(&deps),
            "flutter pub add 'flutter_svg:^2.0.10' 'lottie:^3.1.0'"
        );
    }
}
