//! Test environment for isolated assetgen runs.
//!
//! Each `TestEnv` owns a temp project directory and runs the binary with an
//! empty settings file and no Flutter SDK in the environment, so results do
//! not depend on the machine running the tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running an assetgen command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    settings: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = TempDir::new().unwrap();
        let settings = project_root.path().join(".assetgen-test.toml");
        std::fs::write(&settings, "").unwrap();
        Self {
            project_root,
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("cannot read {}: {}", relative, e))
    }

    /// Command for the binary with an isolated environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_assetgen"));
        cmd.current_dir(self.root())
            .env("ASSETGEN_CONFIG", &self.settings)
            .env_remove("ASSETGEN_FLUTTER_SDK")
            .env_remove("FLUTTER_ROOT")
            .env_remove("ASSETGEN_AUTO_DETECTION")
            .env_remove("ASSETGEN_LOG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to execute assetgen");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
