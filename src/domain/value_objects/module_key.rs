//! Project and module identity used to key per-module state

use std::fmt;
use std::path::Path;

use super::ContentHash;

/// Opaque, stable identifier of a project
///
/// The first 16 hex digits of the SHA-256 of the project root path. Callers
/// pass the canonicalized root so the same project always maps to one id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    const LEN: usize = 16;

    pub fn from_root(root: &Path) -> Self {
        let hash = ContentHash::from_content(&root.to_string_lossy());
        Self(hash.short(Self::LEN).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key: (project, module path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    project: ProjectId,
    module_path: String,
}

impl ModuleKey {
    pub fn new(project: ProjectId, module_path: impl Into<String>) -> Self {
        Self {
            project,
            module_path: module_path.into(),
        }
    }

    /// Key for a module directory inside a project
    pub fn for_module(project: &ProjectId, module_root: &Path) -> Self {
        Self::new(project.clone(), module_root.to_string_lossy().into_owned())
    }

    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn belongs_to(&self, project: &ProjectId) -> bool {
        &self.project == project
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.module_path)
    }
}
