//! Pubspec snapshot - the comparable projection of a module's configuration
//!
//! Two snapshots that agree on every functional field describe the same
//! generated output. The package name counts only while the package
//! parameter is enabled. Dependency and SDK constraint strings ride along for
//! diff logging only and never make two snapshots unequal.

use serde::Serialize;

use super::GenerationStyle;

/// Flattened configuration that decides whether regeneration must run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PubspecSnapshot {
    /// Manifest `name`; emitted as `packageName` in package mode
    pub package_name: Option<String>,
    pub asset_paths: Vec<String>,
    pub output_dir: String,
    pub class_name: String,
    pub output_filename: String,
    pub filename_split_pattern: String,
    pub path_ignore: Vec<String>,
    pub auto_detection: bool,
    pub named_with_parent: bool,
    pub package_parameter_enabled: bool,
    pub style: GenerationStyle,
    /// Declared `flutter_svg` constraint (diff logging only)
    pub flutter_svg_version: Option<String>,
    /// Declared `lottie` constraint (diff logging only)
    pub lottie_version: Option<String>,
    /// `environment.flutter` constraint (diff logging only)
    pub flutter_constraint: Option<String>,
    /// `environment.sdk` constraint (diff logging only)
    pub dart_constraint: Option<String>,
}

/// One differing field between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
    /// Whether the field takes part in change detection
    pub functional: bool,
}

impl PubspecSnapshot {
    /// Equality over the fields that affect generated output
    pub fn functionally_equal(&self, other: &PubspecSnapshot) -> bool {
        (!self.uses_package_name(other) || self.package_name == other.package_name)
            && self.asset_paths == other.asset_paths
            && self.output_dir == other.output_dir
            && self.class_name == other.class_name
            && self.output_filename == other.output_filename
            && self.filename_split_pattern == other.filename_split_pattern
            && self.path_ignore == other.path_ignore
            && self.auto_detection == other.auto_detection
            && self.named_with_parent == other.named_with_parent
            && self.package_parameter_enabled == other.package_parameter_enabled
            && self.style == other.style
    }

    fn uses_package_name(&self, other: &PubspecSnapshot) -> bool {
        self.package_parameter_enabled || other.package_parameter_enabled
    }

    /// Field-level differences from `previous` to `self`
    pub fn diff(&self, previous: &PubspecSnapshot) -> Vec<FieldChange> {
        let package_functional = self.uses_package_name(previous);
        let mut changes = Vec::new();
        let mut push = |field: &'static str, old: String, new: String, functional: bool| {
            if old != new {
                changes.push(FieldChange {
                    field,
                    old,
                    new,
                    functional,
                });
            }
        };

        push(
            "package_name",
            display_opt(&previous.package_name),
            display_opt(&self.package_name),
            package_functional,
        );
        push(
            "asset_paths",
            format!("{:?}", previous.asset_paths),
            format!("{:?}", self.asset_paths),
            true,
        );
        push(
            "output_dir",
            previous.output_dir.clone(),
            self.output_dir.clone(),
            true,
        );
        push(
            "class_name",
            previous.class_name.clone(),
            self.class_name.clone(),
            true,
        );
        push(
            "output_filename",
            previous.output_filename.clone(),
            self.output_filename.clone(),
            true,
        );
        push(
            "filename_split_pattern",
            previous.filename_split_pattern.clone(),
            self.filename_split_pattern.clone(),
            true,
        );
        push(
            "path_ignore",
            format!("{:?}", previous.path_ignore),
            format!("{:?}", self.path_ignore),
            true,
        );
        push(
            "auto_detection",
            previous.auto_detection.to_string(),
            self.auto_detection.to_string(),
            true,
        );
        push(
            "named_with_parent",
            previous.named_with_parent.to_string(),
            self.named_with_parent.to_string(),
            true,
        );
        push(
            "package_parameter_enabled",
            previous.package_parameter_enabled.to_string(),
            self.package_parameter_enabled.to_string(),
            true,
        );
        push(
            "style",
            previous.style.to_string(),
            self.style.to_string(),
            true,
        );
        push(
            "flutter_svg_version",
            display_opt(&previous.flutter_svg_version),
            display_opt(&self.flutter_svg_version),
            false,
        );
        push(
            "lottie_version",
            display_opt(&previous.lottie_version),
            display_opt(&self.lottie_version),
            false,
        );
        push(
            "flutter_constraint",
            display_opt(&previous.flutter_constraint),
            display_opt(&self.flutter_constraint),
            false,
        );
        push(
            "dart_constraint",
            display_opt(&previous.dart_constraint),
            display_opt(&self.dart_constraint),
            false,
        );
        changes
    }
}

fn display_opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "<none>".to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn baseline() -> PubspecSnapshot {
        PubspecSnapshot {
            package_name: Some("app".to_string()),
            asset_paths: vec!["assets/images/".to_string()],
            output_dir: "generated".to_string(),
            class_name: "Assets".to_string(),
            output_filename: "assets".to_string(),
            filename_split_pattern: "[-_]".to_string(),
            path_ignore: Vec::new(),
            auto_detection: false,
            named_with_parent: true,
            package_parameter_enabled: false,
            style: GenerationStyle::Robust,
            flutter_svg_version: Some("^2.0.10".to_string()),
            lottie_version: None,
            flutter_constraint: Some(">=3.10.0".to_string()),
            dart_constraint: Some(">=3.0.0 <4.0.0".to_string()),
        }
    }
}
