//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus module discovery.

mod discovery;
mod local;
mod memory;

pub use discovery::{discover_modules, project_identity};
pub use local::LocalFs;
pub use memory::MemoryFs;
