//! Flutter Version Resolver
//!
//! Resolves the runtime version through a fallback chain: cache, the SDK's
//! version marker files, `flutter --version`, and finally the manifest's
//! `environment.flutter` constraint. Only SDK-derived versions are cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{CommandRunner, FileSystem};
use crate::domain::value_objects::SemanticVersion;

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    Cache,
    MarkerFile,
    Command,
    Constraint,
}

impl std::fmt::Display for VersionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VersionSource::Cache => "cache",
            VersionSource::MarkerFile => "marker file",
            VersionSource::Command => "flutter --version",
            VersionSource::Constraint => "environment constraint",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub version: SemanticVersion,
    pub source: VersionSource,
}

/// Versions resolved from SDK paths, shared by resolvers of one process
#[derive(Debug, Default)]
pub struct VersionCache {
    entries: Mutex<HashMap<PathBuf, SemanticVersion>>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sdk: &Path) -> Option<SemanticVersion> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(sdk).copied()
    }

    pub fn insert(&self, sdk: &Path, version: SemanticVersion) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(sdk.to_path_buf(), version);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn version_output() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Flutter\s+(\d+\.\d+\.\d+)").expect("invalid flutter version regex")
    })
}

/// Extract the version token from `flutter --version` output
pub fn parse_version_output(output: &str) -> Option<SemanticVersion> {
    let captures = version_output().captures(output)?;
    SemanticVersion::parse(captures.get(1)?.as_str())
}

/// Name of the flutter launcher inside `<sdk>/bin`
pub fn flutter_executable(sdk: &Path) -> PathBuf {
    let name = if cfg!(windows) { "flutter.bat" } else { "flutter" };
    sdk.join("bin").join(name)
}

#[derive(Debug, Clone)]
pub struct FlutterVersionResolver<F: FileSystem, R: CommandRunner> {
    fs: F,
    runner: R,
    cache: Arc<VersionCache>,
}

impl<F: FileSystem, R: CommandRunner> FlutterVersionResolver<F, R> {
    pub fn new(fs: F, runner: R, cache: Arc<VersionCache>) -> Self {
        Self { fs, runner, cache }
    }

    /// Resolve the runtime version; `None` when every tier fails
    pub fn resolve(
        &self,
        sdk: Option<&Path>,
        fallback_constraint: Option<&str>,
    ) -> Option<ResolvedVersion> {
        if let Some(sdk) = sdk {
            if let Some(resolved) = self.resolve_from_sdk(sdk) {
                return Some(resolved);
            }
        }

        let version = fallback_constraint.and_then(SemanticVersion::from_constraint)?;
        debug!(%version, "runtime version from environment constraint");
        Some(ResolvedVersion {
            version,
            source: VersionSource::Constraint,
        })
    }

    fn resolve_from_sdk(&self, sdk: &Path) -> Option<ResolvedVersion> {
        if let Some(version) = self.cache.get(sdk) {
            return Some(ResolvedVersion {
                version,
                source: VersionSource::Cache,
            });
        }

        let resolved = self
            .read_marker_file(sdk)
            .map(|version| ResolvedVersion {
                version,
                source: VersionSource::MarkerFile,
            })
            .or_else(|| {
                self.run_version_command(sdk).map(|version| ResolvedVersion {
                    version,
                    source: VersionSource::Command,
                })
            })?;

        debug!(sdk = %sdk.display(), version = %resolved.version, source = %resolved.source, "resolved runtime version");
        self.cache.insert(sdk, resolved.version);
        Some(resolved)
    }

    fn read_marker_file(&self, sdk: &Path) -> Option<SemanticVersion> {
        if let Ok(text) = self.fs.read_to_string(&sdk.join("version")) {
            if let Some(version) = text.lines().next().and_then(SemanticVersion::parse) {
                return Some(version);
            }
        }

        let json_path = sdk.join("bin").join("cache").join("flutter.version.json");
        let text = self.fs.read_to_string(&json_path).ok()?;
        let value: serde_json::Value = serde_json::from_str(&text).ok()?;
        ["frameworkVersion", "flutterVersion"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .find_map(SemanticVersion::parse)
    }

    fn run_version_command(&self, sdk: &Path) -> Option<SemanticVersion> {
        let program = flutter_executable(sdk);
        match self.runner.run(&program, &["--version"], None) {
            Ok(output) => parse_version_output(&output.stdout)
                .or_else(|| parse_version_output(&output.stderr)),
            Err(err) => {
                debug!(program = %program.display(), error = %err, "flutter --version failed");
                None
            }
        }
    }
}
