//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
///
/// Writes go to a temporary file next to the target and are renamed over it,
/// so readers never observe a half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> FsResult<Vec<u8>> {
        let file = fs::File::open(path).map_err(|e| FsError::from_io(path, e))?;
        let mut buf = Vec::with_capacity(limit);
        file.take(limit as u64)
            .read_to_end(&mut buf)
            .map_err(|e| FsError::from_io(path, e))?;
        Ok(buf)
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        fs::metadata(path)
            .map(|meta| meta.len())
            .map_err(|e| FsError::from_io(path, e))
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::from_io(path, e))? {
            let entry = entry.map_err(|e| FsError::from_io(path, e))?;
            let entry_path = entry.path();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry_path.is_dir(),
                path: entry_path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| FsError::from_io(path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| FsError::from_io(path, e))?;
        temp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn content_hash(&self, path: &Path) -> FsResult<Option<String>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(ContentHash::from_bytes(&bytes).to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::from_io(path, e)),
        }
    }
}
