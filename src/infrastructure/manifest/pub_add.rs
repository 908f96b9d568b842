use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ports::{
    CommandRunner, DependencyRequestStatus, ManifestWriteError, ManifestWriter,
};
use crate::domain::services::version_resolver::flutter_executable;

/// Adds dependencies with `flutter pub add`, which also fetches them
#[derive(Debug, Clone)]
pub struct PubAddManifestWriter<R: CommandRunner> {
    runner: R,
    flutter_sdk: Option<PathBuf>,
}

impl<R: CommandRunner> PubAddManifestWriter<R> {
    pub fn new(runner: R, flutter_sdk: Option<PathBuf>) -> Self {
        Self {
            runner,
            flutter_sdk,
        }
    }

    fn program(&self) -> PathBuf {
        match &self.flutter_sdk {
            Some(sdk) => flutter_executable(sdk),
            None => PathBuf::from("flutter"),
        }
    }
}

impl<R: CommandRunner> ManifestWriter for PubAddManifestWriter<R> {
    fn request_dependencies(
        &self,
        module_root: &Path,
        _manifest: &Path,
        dependencies: &BTreeMap<String, String>,
    ) -> Result<DependencyRequestStatus, ManifestWriteError> {
        if dependencies.is_empty() {
            return Ok(DependencyRequestStatus::Installed);
        }

        let specs: Vec<String> = dependencies
            .iter()
            .map(|(package, constraint)| format!("{}:{}", package, constraint))
            .collect();
        let mut args = vec!["pub", "add"];
        args.extend(specs.iter().map(String::as_str));

        info!(module = %module_root.display(), packages = %specs.join(" "), "adding dependencies");
        let output = self
            .runner
            .run(&self.program(), &args, Some(module_root))
            .map_err(|source| ManifestWriteError::Spawn {
                module: module_root.to_path_buf(),
                source,
            })?;

        if output.success {
            Ok(DependencyRequestStatus::Installed)
        } else {
            Err(ManifestWriteError::Failed {
                module: module_root.to_path_buf(),
                message: output.stderr.trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CommandOutput;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        fail: bool,
        calls: Mutex<Vec<(PathBuf, Vec<String>, Option<PathBuf>)>>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(
            &self,
            program: &Path,
            args: &[&str],
            cwd: Option<&Path>,
        ) -> std::io::Result<CommandOutput> {
            self.calls.lock().unwrap().push((
                program.to_path_buf(),
                args.iter().map(|a| a.to_string()).collect(),
                cwd.map(Path::to_path_buf),
            ));
            Ok(CommandOutput {
                success: !self.fail,
                stdout: String::new(),
                stderr: if self.fail {
                    "version solving failed\n".to_string()
                } else {
                    String::new()
                },
            })
        }
    }

    fn deps() -> BTreeMap<String, String> {
        [("flutter_svg".to_string(), "^2.0.10".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn runs_pub_add_in_module() {
        let runner = RecordingRunner::default();
        let writer = PubAddManifestWriter::new(&runner, Some(PathBuf::from("/sdk")));

        let status = writer
            .request_dependencies(Path::new("/app"), Path::new("/app/pubspec.yaml"), &deps())
            .unwrap();

        assert_eq!(status, DependencyRequestStatus::Installed);
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, flutter_executable(Path::new("/sdk")));
        assert_eq!(calls[0].1, vec!["pub", "add", "flutter_svg:^2.0.10"]);
        assert_eq!(calls[0].2, Some(PathBuf::from("/app")));
    }

    #[test]
    fn failure_carries_stderr() {
        let runner = RecordingRunner {
            fail: true,
            ..RecordingRunner::default()
        };
        let writer = PubAddManifestWriter::new(&runner, None);

        let err = writer
            .request_dependencies(Path::new("/app"), Path::new("/app/pubspec.yaml"), &deps())
            .unwrap_err();
        assert!(err.to_string().contains("version solving failed"));
    }

    #[test]
    fn empty_request_runs_nothing() {
        let runner = RecordingRunner::default();
        let writer = PubAddManifestWriter::new(&runner, None);
        writer
            .request_dependencies(Path::new("/app"), Path::new("/app/pubspec.yaml"), &BTreeMap::new())
            .unwrap();
        assert!(runner.calls.lock().unwrap().is_empty());
    }
}
