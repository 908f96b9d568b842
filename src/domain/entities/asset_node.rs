//! Asset node entity - one node of the scanned resource tree
//!
//! Trees are built in a single scan pass and never mutated afterwards; every
//! generation cycle scans again and gets a fresh tree.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::MediaType;

/// Display name of the synthetic root
pub const ROOT_NAME: &str = "Assets";

/// A node in the asset tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetNode {
    /// Display name (extension stripped for leaves)
    name: String,
    /// Path relative to the module root, `/`-separated; dedup key
    relative_path: String,
    media_type: MediaType,
    /// Underlying file, absent for directories
    #[serde(skip)]
    source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<AssetNode>,
}

impl AssetNode {
    /// The synthetic root directory (empty relative path)
    pub fn root(children: Vec<AssetNode>) -> Self {
        Self::directory(ROOT_NAME, "", children)
    }

    pub fn directory(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        children: Vec<AssetNode>,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            media_type: MediaType::Directory,
            source: None,
            children,
        }
    }

    /// A file leaf; `media_type` must not be `Directory`
    pub fn leaf(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        media_type: MediaType,
        source: impl Into<PathBuf>,
    ) -> Self {
        debug_assert!(media_type.is_leaf());
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            media_type,
            source: Some(source.into()),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn children(&self) -> &[AssetNode] {
        &self.children
    }

    pub fn is_directory(&self) -> bool {
        self.media_type == MediaType::Directory
    }

    pub fn is_root(&self) -> bool {
        self.is_directory() && self.relative_path.is_empty()
    }

    /// Last path segment including any extension (`logo.png`)
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&self.name)
    }

    /// Extension of a leaf's file name, without the dot
    pub fn extension(&self) -> Option<&str> {
        if self.is_directory() {
            return None;
        }
        let (stem, ext) = self.file_name().rsplit_once('.')?;
        if stem.is_empty() {
            None
        } else {
            Some(ext)
        }
    }

    /// All leaves in depth-first order
    pub fn leaves(&self) -> Vec<&AssetNode> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a AssetNode>) {
        if !self.is_directory() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// All directories below (and excluding) this node, depth-first pre-order
    pub fn directories(&self) -> Vec<&AssetNode> {
        let mut dirs = Vec::new();
        for child in &self.children {
            if child.is_directory() {
                dirs.push(child);
                dirs.extend(child.directories());
            }
        }
        dirs
    }

    /// Whether any leaf of the given media type exists in this subtree
    pub fn contains_media(&self, media_type: MediaType) -> bool {
        if self.media_type == media_type && !self.is_directory() {
            return true;
        }
        self.children
            .iter()
            .any(|child| child.contains_media(media_type))
    }

    /// Find a node by relative path
    pub fn find(&self, relative_path: &str) -> Option<&AssetNode> {
        if self.relative_path == relative_path {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find(relative_path))
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }
}
