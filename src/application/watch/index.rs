//! Maps changed paths to the module they belong to

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{ModuleConfig, MANIFEST_FILE};

use super::scheduler::Signal;

#[derive(Debug, Clone)]
struct ModuleEntry {
    manifest: PathBuf,
    /// `None` while the manifest does not load
    output: Option<PathBuf>,
    /// Configured roots; any path below one, at any depth, is an asset change
    asset_roots: Vec<PathBuf>,
}

impl ModuleEntry {
    fn unloaded(root: &Path) -> Self {
        Self {
            manifest: root.join(MANIFEST_FILE),
            output: None,
            asset_roots: Vec::new(),
        }
    }

    fn from_config(config: &ModuleConfig) -> Self {
        let asset_roots = config
            .asset_roots
            .iter()
            .map(|root| {
                let trimmed = root.trim_start_matches("./").trim_end_matches('/');
                config.root.join(trimmed)
            })
            .collect();
        Self {
            manifest: config.manifest_path.clone(),
            output: Some(config.output_path()),
            asset_roots,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    entries: BTreeMap<PathBuf, ModuleEntry>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a module from its resolved configuration
    pub fn update(&mut self, config: &ModuleConfig) {
        self.entries
            .insert(config.root.clone(), ModuleEntry::from_config(config));
    }

    /// Index a module whose manifest failed to load; only manifest saves map to it
    pub fn update_unloaded(&mut self, root: &Path) {
        self.entries
            .insert(root.to_path_buf(), ModuleEntry::unloaded(root));
    }

    pub fn modules(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modules a changed path concerns, and how
    ///
    /// Generated output files never map to anything.
    pub fn classify(&self, path: &Path) -> Vec<(PathBuf, Signal)> {
        if self
            .entries
            .values()
            .any(|entry| entry.output.as_deref() == Some(path))
        {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (root, entry) in &self.entries {
            if entry.manifest == path {
                hits.push((root.clone(), Signal::ConfigSaved));
            } else if entry.asset_roots.iter().any(|asset| path.starts_with(asset)) {
                hits.push((root.clone(), Signal::AssetsTouched));
            }
        }
        hits
    }
}
