//! Domain Services
//!
//! Pure logic over domain entities. File and process access goes through the
//! ports, so every service runs against in-memory fakes in tests.

pub mod codegen;
pub mod identifier;
pub mod tree_builder;
pub mod version_resolver;
pub mod version_selector;

pub use codegen::{effective_asset_path, CodeGenerator, GenerationSettings};
pub use identifier::{to_identifier, IdentifierSanitizer};
pub use tree_builder::{TreeBuilder, TreeScan};
pub use version_resolver::{
    FlutterVersionResolver, ResolvedVersion, VersionCache, VersionSource,
};
pub use version_selector::select_version;
