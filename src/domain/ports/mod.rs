//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod file_system;
pub mod manifest_writer;

pub use command_runner::{CommandOutput, CommandRunner};
pub use file_system::{DirEntry, FileSystem, FsError, FsResult};
pub use manifest_writer::{DependencyRequestStatus, ManifestWriteError, ManifestWriter};
