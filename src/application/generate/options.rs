//! Generate Options

use std::path::PathBuf;

/// Options for the generate use case
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Render and compare, never write or request dependencies
    pub dry_run: bool,
    /// SDK path that beats every configured one (`--flutter-sdk`)
    pub flutter_sdk: Option<PathBuf>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_flutter_sdk(mut self, sdk: Option<PathBuf>) -> Self {
        self.flutter_sdk = sdk;
        self
    }
}
