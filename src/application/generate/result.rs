//! Generate Result
//!
//! Result types for generation cycles.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ModuleConfig;
use crate::domain::entities::AssetNode;
use crate::domain::ports::DependencyRequestStatus;
use crate::domain::services::ResolvedVersion;
use crate::domain::value_objects::CapabilityAvailability;

/// Everything rendered for one module, before anything is written
#[derive(Debug, Clone)]
pub struct ModulePlan {
    pub config: ModuleConfig,
    pub tree: AssetNode,
    pub missing_roots: Vec<String>,
    pub availability: CapabilityAvailability,
    /// Packages the generated code relies on but the manifest lacks
    pub dependencies: BTreeMap<String, String>,
    pub runtime: Option<ResolvedVersion>,
    pub content: String,
}

impl ModulePlan {
    pub fn output_path(&self) -> PathBuf {
        self.config.output_path()
    }
}

/// What happened to the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Written,
    Unchanged,
    /// Dry run and the output would change
    WouldWrite,
}

/// Result of generating one module
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub module: PathBuf,
    pub name: String,
    pub output: PathBuf,
    pub status: WriteStatus,
    pub leaf_count: usize,
    pub missing_roots: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dependency_status: Option<DependencyRequestStatus>,
    pub runtime: Option<ResolvedVersion>,
    pub warnings: Vec<String>,
}

/// A module whose generation failed
#[derive(Debug, Clone, Serialize)]
pub struct ModuleFailure {
    pub module: PathBuf,
    pub error: String,
}

/// Result of generating every module of a project
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectReport {
    pub modules: Vec<ModuleReport>,
    pub failures: Vec<ModuleFailure>,
}

impl ProjectReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn written(&self) -> usize {
        self.count(WriteStatus::Written)
    }

    pub fn unchanged(&self) -> usize {
        self.count(WriteStatus::Unchanged)
    }

    fn count(&self, status: WriteStatus) -> usize {
        self.modules.iter().filter(|m| m.status == status).count()
    }
}
