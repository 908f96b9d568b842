//! FileSystem port - abstraction over file I/O operations
//!
//! The tree builder, the version resolver and the output writer only see this
//! trait, so they run unchanged against the local disk or an in-memory tree.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File not found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// I/O error
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Map an I/O error to the matching variant, keeping the path it concerns
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// True for the "does not exist" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name (last path component)
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MemoryFs` - in-memory tree for tests
pub trait FileSystem {
    /// Read file content as string
    fn read_to_string(&self, path: &Path) -> FsResult<String>;

    /// Read at most `limit` bytes from the start of a file
    fn read_prefix(&self, path: &Path, limit: usize) -> FsResult<Vec<u8>>;

    /// Size of a file in bytes
    fn file_size(&self, path: &Path) -> FsResult<u64>;

    /// List a directory, sorted by name
    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }

    /// Replace file content in one step, creating parent directories
    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Content hash (`sha256:<hex>`), `None` when the file does not exist
    fn content_hash(&self, path: &Path) -> FsResult<Option<String>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        (**self).read_to_string(path)
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> FsResult<Vec<u8>> {
        (**self).read_prefix(path, limit)
    }

    fn file_size(&self, path: &Path) -> FsResult<u64> {
        (**self).file_size(path)
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        (**self).list_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write_atomic(path, content)
    }

    fn content_hash(&self, path: &Path) -> FsResult<Option<String>> {
        (**self).content_hash(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_display() {
        let err = FsError::NotFound(PathBuf::from("test.txt"));
        assert!(err.to_string().contains("test.txt"));
    }

    #[test]
    fn fs_error_from_io_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let fs_err = FsError::from_io(Path::new("assets/logo.png"), io_err);
        assert!(fs_err.is_not_found());
        assert!(fs_err.to_string().contains("assets/logo.png"));
    }

    #[test]
    fn fs_error_from_io_other_kind() {
        let io_err = std::io::Error::other("disk on fire");
        let fs_err = FsError::from_io(Path::new("x"), io_err);
        assert!(matches!(fs_err, FsError::Io { .. }));
        assert!(!fs_err.is_not_found());
    }
}
