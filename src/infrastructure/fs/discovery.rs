//! Module discovery
//!
//! A project is a directory tree; every directory holding a `pubspec.yaml` is
//! a module. The walk honors `.gitignore` and skips hidden directories and
//! Flutter build output.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::config::MANIFEST_FILE;
use crate::domain::value_objects::ProjectId;

/// Directories never searched for modules
const SKIPPED_DIRS: &[&str] = &["build", ".dart_tool"];

/// Canonical project root and its identifier
pub fn project_identity(root: &Path) -> (PathBuf, ProjectId) {
    let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let id = ProjectId::from_root(&canonical);
    (canonical, id)
}

/// Module roots below `project_root`, sorted by path
pub fn discover_modules(project_root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(project_root)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            let name = entry.file_name().to_string_lossy();
            !(is_dir && entry.depth() > 0 && SKIPPED_DIRS.contains(&name.as_ref()))
        })
        .build();

    let mut modules: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_some_and(|ft| ft.is_file())
                && entry.file_name() == MANIFEST_FILE
        })
        .filter_map(|entry| entry.path().parent().map(Path::to_path_buf))
        .collect();

    modules.sort();
    modules.dedup();
    modules
}
