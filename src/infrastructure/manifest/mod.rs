//! Manifest writer implementations
//!
//! Neither writer edits `pubspec.yaml` directly: one reports the request, the
//! other hands it to `flutter pub add`.

mod pub_add;
mod reporting;

pub use pub_add::PubAddManifestWriter;
pub use reporting::{pub_add_command, DependencyRequest, ReportingManifestWriter};
