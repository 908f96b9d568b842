//! Value objects - immutable types compared by value

mod capability;
mod config_warning;
mod generation_style;
mod hash;
mod media_type;
mod module_key;
mod pubspec_snapshot;
mod semantic_version;

pub use capability::{Capability, CapabilityAvailability};
pub use config_warning::ConfigWarning;
pub use generation_style::GenerationStyle;
pub use hash::ContentHash;
pub use media_type::MediaType;
pub use module_key::{ModuleKey, ProjectId};
pub use pubspec_snapshot::{FieldChange, PubspecSnapshot};
pub use semantic_version::SemanticVersion;

#[cfg(test)]
pub(crate) use pubspec_snapshot::fixtures as snapshot_fixtures;
