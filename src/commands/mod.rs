//! Command entry points
//!
//! Each command returns `Ok(false)` when it ran but some module failed, so
//! `main` can exit non-zero after printing everything.

pub mod diff;
pub mod generate;
pub mod tree;
pub mod versions;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use assetgen::config::{load_or_default, settings_path, GlobalSettings};
use assetgen::infrastructure::fs::{discover_modules, project_identity};

use crate::ui::views::render_config_warnings;

/// Global settings with environment overrides applied
pub fn load_global(explicit: Option<&Path>, json: bool) -> GlobalSettings {
    let (settings, warnings) = load_or_default(explicit);
    if !warnings.is_empty() && !json {
        eprint!("{}", render_config_warnings(&warnings, false));
    }
    if let Some(path) = settings_path(explicit) {
        tracing::debug!(path = %path.display(), "global settings");
    }
    settings
}

/// Project root and the modules to process
///
/// `--module` selects one module; otherwise every `pubspec.yaml` below the
/// project root is a module.
pub fn resolve_modules(project: &Path, module: Option<&Path>) -> Result<(PathBuf, Vec<PathBuf>)> {
    if let Some(module) = module {
        let module = module
            .canonicalize()
            .unwrap_or_else(|_| module.to_path_buf());
        let root = module.clone();
        return Ok((root, vec![module]));
    }

    if !project.is_dir() {
        bail!("project directory not found: {}", project.display());
    }
    let (root, _) = project_identity(project);
    let modules = discover_modules(&root);
    if modules.is_empty() {
        bail!("no pubspec.yaml found under {}", root.display());
    }
    Ok((root, modules))
}
