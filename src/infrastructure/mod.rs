//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory) and module discovery
//! - `process/` - Command runner backed by `std::process`
//! - `manifest/` - Manifest writers (reporting, `flutter pub add`)

pub mod fs;
pub mod manifest;
pub mod process;

pub use fs::{LocalFs, MemoryFs};
pub use manifest::{PubAddManifestWriter, ReportingManifestWriter};
pub use process::SystemCommandRunner;
