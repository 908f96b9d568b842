//! In-memory File System
//!
//! Shared, cloneable tree used by unit and integration tests. Directories are
//! implied by the files below them or added explicitly.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    declared_sizes: HashMap<PathBuf, u64>,
    prefix_reads: usize,
    writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.state()
            .files
            .insert(path.as_ref().to_path_buf(), content.to_string());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.state().dirs.insert(path.as_ref().to_path_buf());
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.state().files.remove(path.as_ref());
    }

    /// Report `size` from `file_size` regardless of the stored content
    pub fn set_declared_size(&self, path: impl AsRef<Path>, size: u64) {
        self.state()
            .declared_sizes
            .insert(path.as_ref().to_path_buf(), size);
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state().files.get(path.as_ref()).cloned()
    }

    /// Number of `read_prefix` calls so far
    pub fn prefix_reads(&self) -> usize {
        self.state().prefix_reads
    }

    /// Number of `write_atomic` calls so far
    pub fn writes(&self) -> usize {
        self.state().writes
    }
}

fn has_descendant<'a>(mut paths: impl Iterator<Item = &'a PathBuf>, dir: &Path) -> bool {
    paths.any(|p| p != dir && p.starts_with(dir))
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        self.contents(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> FsResult<Vec<u8>> {
        let mut state = self.state();
        state.prefix_reads += 1;
        let content = state
            .files
            .get(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))?;
        Ok(content.as_bytes().iter().take(limit).copied().collect())
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        let state = self.state();
        if let Some(size) = state.declared_sizes.get(path) {
            return Ok(*size);
        }
        state
            .files
            .get(path)
            .map(|content| content.len() as u64)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        let state = self.state();
        let mut children: BTreeMap<String, DirEntry> = BTreeMap::new();
        let candidates = state
            .files
            .keys()
            .map(|p| (p, false))
            .chain(state.dirs.iter().map(|p| (p, true)));
        for (candidate, explicit_dir) in candidates {
            let Ok(rest) = candidate.strip_prefix(path) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = explicit_dir || components.next().is_some();
            let entry = children.entry(name.clone()).or_insert_with(|| DirEntry {
                path: path.join(&name),
                name,
                is_dir,
            });
            entry.is_dir |= is_dir;
        }
        Ok(children.into_values().collect())
    }

    fn is_dir(&self, path: &Path) -> bool {
        let state = self.state();
        state.dirs.contains(path)
            || has_descendant(state.files.keys(), path)
            || has_descendant(state.dirs.iter(), path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.state().files.contains_key(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        let mut state = self.state();
        state.writes += 1;
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn content_hash(&self, path: &Path) -> FsResult<Option<String>> {
        Ok(self
            .contents(path)
            .map(|content| ContentHash::from_content(&content).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_directories() {
        let fs = MemoryFs::new();
        fs.add_file("/m/assets/images/logo.png", "png");

        assert!(fs.is_dir(Path::new("/m/assets")));
        assert!(fs.is_dir(Path::new("/m/assets/images")));
        assert!(!fs.is_dir(Path::new("/m/assets/images/logo.png")));
        assert!(fs.is_file(Path::new("/m/assets/images/logo.png")));
    }

    #[test]
    fn list_dir_reports_files_and_dirs_sorted() {
        let fs = MemoryFs::new();
        fs.add_file("/m/assets/b.png", "b");
        fs.add_file("/m/assets/a.png", "a");
        fs.add_file("/m/assets/2.0x/a.png", "a");
        fs.add_dir("/m/assets/empty");

        let entries = fs.list_dir(Path::new("/m/assets")).unwrap();
        let listing: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.is_dir)).collect();
        assert_eq!(
            listing,
            vec![("2.0x", true), ("a.png", false), ("b.png", false), ("empty", true)]
        );
        assert_eq!(entries[1].path, PathBuf::from("/m/assets/a.png"));
    }

    #[test]
    fn list_missing_dir_is_not_found() {
        let fs = MemoryFs::new();
        assert!(fs.list_dir(Path::new("/nope")).unwrap_err().is_not_found());
    }

    #[test]
    fn declared_size_overrides_content_length() {
        let fs = MemoryFs::new();
        fs.add_file("/big.json", "{}");
        fs.set_declared_size("/big.json", 6_000_000);
        assert_eq!(fs.file_size(Path::new("/big.json")).unwrap(), 6_000_000);
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFs::new();
        let other = fs.clone();
        other.write_atomic(Path::new("/out.dart"), "x").unwrap();
        assert_eq!(fs.contents("/out.dart").as_deref(), Some("x"));
        assert_eq!(fs.writes(), 1);
    }
}
