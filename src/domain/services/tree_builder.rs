//! Asset Tree Builder
//!
//! Scans the configured asset roots of one module and produces an immutable
//! `AssetNode` tree. Directory roots are walked recursively; hidden entries,
//! resolution variants (`2.0x`) and ignored paths are skipped on the way down.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::domain::entities::AssetNode;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::MediaType;

/// Bytes read when probing a candidate animation file
pub const PROBE_LIMIT: usize = 200;

/// Candidates larger than this are never probed
pub const PROBE_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Directories nested deeper than this below a root are not scanned
pub const MAX_SCAN_DEPTH: usize = 32;

fn resolution_variant() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d+)?x$").expect("invalid resolution regex"))
}

/// Whether a directory name is a resolution variant such as `2.0x` or `3x`
pub fn is_resolution_variant(name: &str) -> bool {
    resolution_variant().is_match(name)
}

/// Result of one scan
#[derive(Debug, Clone)]
pub struct TreeScan {
    pub root: AssetNode,
    /// Configured roots that do not exist, in configuration order
    pub missing_roots: Vec<String>,
}

/// Builds asset trees over a file system port
#[derive(Debug, Clone)]
pub struct TreeBuilder<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> TreeBuilder<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Scan `roots` (paths relative to `module_root`) into a tree
    ///
    /// Roots that are missing are collected and skipped; no error aborts the
    /// scan.
    pub fn build(&self, roots: &[String], module_root: &Path, ignore: &[String]) -> TreeScan {
        let ignore: Vec<String> = ignore
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| pattern.to_lowercase())
            .collect();
        let mut root = DirBuilder::new(String::new(), String::new());
        let mut seen = HashSet::new();
        let mut missing_roots = Vec::new();

        for configured in roots {
            let relative = normalize_root(configured);
            if relative.is_empty() {
                continue;
            }
            if relative
                .split('/')
                .any(|segment| segment.starts_with('.') || is_resolution_variant(segment))
            {
                debug!(root = %configured, "skipping hidden or resolution-variant root");
                continue;
            }
            if is_ignored(&relative, &ignore) {
                debug!(root = %configured, "skipping ignored root");
                continue;
            }

            let absolute = module_root.join(&relative);
            if self.fs.is_dir(&absolute) {
                self.scan_directory(&mut root, &relative, &absolute, &ignore, &mut seen, 0);
            } else if self.fs.is_file(&absolute) {
                let (parent, file_name) = match relative.rsplit_once('/') {
                    Some((parent, file_name)) => (parent.to_string(), file_name.to_string()),
                    None => (String::new(), relative.clone()),
                };
                let leaf = self.classify_leaf(&file_name, &relative, &absolute);
                if seen.insert(relative.clone()) {
                    root.dir_for(&parent).insert_leaf(file_name, leaf);
                }
            } else {
                missing_roots.push(configured.clone());
            }
        }

        TreeScan {
            root: AssetNode::root(root.finish()),
            missing_roots,
        }
    }

    fn scan_directory(
        &self,
        root: &mut DirBuilder,
        relative: &str,
        absolute: &Path,
        ignore: &[String],
        seen: &mut HashSet<String>,
        depth: usize,
    ) {
        let entries = match self.fs.list_dir(absolute) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(root = %relative, error = %err, "unreadable asset directory");
                return;
            }
        };

        root.dir_for(relative);
        for entry in entries {
            if entry.name.starts_with('.') {
                continue;
            }
            let child_path = format!("{}/{}", relative, entry.name);
            if is_ignored(&child_path, ignore) {
                debug!(path = %child_path, "ignored");
                continue;
            }

            if entry.is_dir {
                if is_resolution_variant(&entry.name) {
                    debug!(path = %child_path, "skipping resolution variant");
                    continue;
                }
                if depth + 1 >= MAX_SCAN_DEPTH {
                    debug!(path = %child_path, "asset tree too deep, not descending");
                    continue;
                }
                self.scan_directory(root, &child_path, &entry.path, ignore, seen, depth + 1);
                continue;
            }

            if !seen.insert(child_path.clone()) {
                continue;
            }
            let leaf = self.classify_leaf(&entry.name, &child_path, &entry.path);
            root.dir_for(relative).insert_leaf(entry.name, leaf);
        }
    }

    fn classify_leaf(&self, file_name: &str, relative: &str, absolute: &Path) -> AssetNode {
        let (stem, ext) = split_extension(file_name);
        let media_type = match MediaType::from_extension(ext) {
            Some(media_type) => media_type,
            None => self.probe_animation(absolute),
        };
        AssetNode::leaf(stem, relative, media_type, absolute)
    }

    /// Content probe for `.json` / `.lottie` candidates
    pub fn probe_animation(&self, path: &Path) -> MediaType {
        match self.fs.file_size(path) {
            Ok(size) if size > PROBE_MAX_FILE_SIZE => return MediaType::Unknown,
            Ok(_) => {}
            Err(err) => {
                debug!(path = %path.display(), error = %err, "probe failed");
                return MediaType::Unknown;
            }
        }
        match self.fs.read_prefix(path, PROBE_LIMIT) {
            Ok(bytes) if looks_like_lottie(&bytes) => MediaType::Animation,
            Ok(_) => MediaType::Unknown,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "probe failed");
                MediaType::Unknown
            }
        }
    }
}

/// Version key plus a layers or in-point key
pub fn looks_like_lottie(prefix: &[u8]) -> bool {
    let head = String::from_utf8_lossy(prefix);
    head.contains("\"v\"") && (head.contains("\"layers\"") || head.contains("\"ip\""))
}

fn normalize_root(configured: &str) -> String {
    configured
        .trim()
        .replace('\\', "/")
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}

fn is_ignored(path: &str, ignore: &[String]) -> bool {
    if ignore.is_empty() {
        return false;
    }
    let lowered = path.to_lowercase();
    ignore.iter().any(|pattern| lowered.contains(pattern.as_str()))
}

fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (file_name, ""),
    }
}

/// Mutable directory used while scanning
struct DirBuilder {
    name: String,
    relative_path: String,
    dirs: BTreeMap<String, DirBuilder>,
    leaves: BTreeMap<String, AssetNode>,
}

impl DirBuilder {
    fn new(name: String, relative_path: String) -> Self {
        Self {
            name,
            relative_path,
            dirs: BTreeMap::new(),
            leaves: BTreeMap::new(),
        }
    }

    /// Directory node for `relative`, creating intermediate nodes
    fn dir_for(&mut self, relative: &str) -> &mut DirBuilder {
        let mut current = self;
        if relative.is_empty() {
            return current;
        }
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            let child_path = if current.relative_path.is_empty() {
                segment.to_string()
            } else {
                format!("{}/{}", current.relative_path, segment)
            };
            current = current
                .dirs
                .entry(segment.to_string())
                .or_insert_with(|| DirBuilder::new(segment.to_string(), child_path));
        }
        current
    }

    fn insert_leaf(&mut self, file_name: String, leaf: AssetNode) {
        self.leaves.entry(file_name).or_insert(leaf);
    }

    /// Freeze into sorted children, pruning empty directories post-order
    fn finish(self) -> Vec<AssetNode> {
        let mut children: Vec<(String, AssetNode)> = Vec::new();
        for (name, dir) in self.dirs {
            let relative_path = dir.relative_path.clone();
            let display = dir.name.clone();
            let grandchildren = dir.finish();
            if grandchildren.is_empty() {
                continue;
            }
            children.push((name, AssetNode::directory(display, relative_path, grandchildren)));
        }
        children.extend(self.leaves);
        children.sort_by(|a, b| a.0.cmp(&b.0));
        children.into_iter().map(|(_, node)| node).collect()
    }
}
