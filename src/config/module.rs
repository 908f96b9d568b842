//! Per-module configuration
//!
//! Resolves every setting through three tiers, highest first: the module's
//! `flutter_assets_generator` section, the global settings file, and the
//! hard-coded defaults.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::ports::FileSystem;
use crate::domain::services::identifier::IdentifierSanitizer;
use crate::domain::services::version_selector::constraint_major;
use crate::domain::services::GenerationSettings;
use crate::domain::value_objects::{Capability, ConfigWarning, GenerationStyle, PubspecSnapshot};
use crate::error::{AssetGenError, AssetGenResult};

use super::manifest::PubspecManifest;
use super::types::{defaults, GlobalSettings};

/// File name of a module manifest
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Fully resolved settings of one module
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: PubspecManifest,
    pub asset_roots: Vec<String>,
    pub output_dir: String,
    pub class_name: String,
    pub output_filename: String,
    /// Split pattern after validation (invalid patterns fall back)
    pub split_pattern: String,
    pub path_ignore: Vec<String>,
    pub auto_detection: bool,
    pub named_with_parent: bool,
    /// Package mode as effectively applied (requires a package name)
    pub package_parameter_enabled: bool,
    pub style: GenerationStyle,
    pub flutter_sdk: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl ModuleConfig {
    /// Read and resolve the manifest of the module at `root`
    pub fn load<F: FileSystem>(
        fs: &F,
        root: &Path,
        global: &GlobalSettings,
    ) -> AssetGenResult<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !fs.is_file(&manifest_path) {
            return Err(AssetGenError::ManifestNotFound {
                module: root.to_path_buf(),
            });
        }
        let content = fs.read_to_string(&manifest_path)?;
        let (manifest, mut warnings) =
            PubspecManifest::parse_with_warnings(&content, &manifest_path)?;
        let mut config = Self::resolve(root, manifest, global);
        warnings.append(&mut config.warnings);
        config.warnings = warnings;
        Ok(config)
    }

    /// Resolve settings from a parsed manifest and the global tier
    pub fn resolve(root: &Path, manifest: PubspecManifest, global: &GlobalSettings) -> Self {
        let manifest_path = root.join(MANIFEST_FILE);
        let section = manifest.generator.clone();
        let mut warnings = Vec::new();

        let requested_pattern = section
            .filename_split_pattern
            .or_else(|| global.filename_split_pattern.clone())
            .unwrap_or_else(|| defaults::SPLIT_PATTERN.to_string());
        let split_pattern = match regex::Regex::new(&requested_pattern) {
            Ok(_) => requested_pattern,
            Err(err) => {
                warn!(module = %root.display(), pattern = %requested_pattern, error = %err, "invalid filename_split_pattern");
                warnings.push(ConfigWarning::invalid_value(
                    "filename_split_pattern",
                    &manifest_path,
                    format!(
                        "invalid pattern '{}', using '{}'",
                        requested_pattern,
                        defaults::SPLIT_PATTERN
                    ),
                ));
                defaults::SPLIT_PATTERN.to_string()
            }
        };

        let style = match section.style.as_deref() {
            None => GenerationStyle::default(),
            Some(raw) => GenerationStyle::parse(raw).unwrap_or_else(|| {
                warnings.push(ConfigWarning::invalid_value(
                    "style",
                    &manifest_path,
                    format!("unknown style '{}', using robust", raw),
                ));
                GenerationStyle::default()
            }),
        };

        let mut package_parameter_enabled = section
            .package_parameter_enabled
            .or(global.package_parameter_enabled)
            .unwrap_or(defaults::PACKAGE_PARAMETER_ENABLED);
        if package_parameter_enabled && !manifest.name.as_deref().is_some_and(|name| !name.is_empty()) {
            warnings.push(ConfigWarning::invalid_value(
                "package_parameter_enabled",
                &manifest_path,
                "package mode needs a package name, disabled",
            ));
            package_parameter_enabled = false;
        }

        Self {
            root: root.to_path_buf(),
            manifest_path,
            asset_roots: manifest.asset_paths(),
            output_dir: section
                .output_dir
                .or_else(|| global.output_dir.clone())
                .unwrap_or_else(|| defaults::OUTPUT_DIR.to_string()),
            class_name: section
                .class_name
                .or_else(|| global.class_name.clone())
                .unwrap_or_else(|| defaults::CLASS_NAME.to_string()),
            output_filename: section
                .output_filename
                .or_else(|| global.file_name.clone())
                .unwrap_or_else(|| defaults::OUTPUT_FILENAME.to_string()),
            split_pattern,
            path_ignore: section.path_ignore.unwrap_or_default(),
            auto_detection: section
                .auto_detection
                .or(global.auto_detection)
                .unwrap_or(defaults::AUTO_DETECTION),
            named_with_parent: section
                .named_with_parent
                .or(global.named_with_parent)
                .unwrap_or(defaults::NAMED_WITH_PARENT),
            package_parameter_enabled,
            style,
            flutter_sdk: global.flutter_sdk.clone(),
            manifest,
            warnings,
        }
    }

    /// `<root>/lib/<output_dir>/<output_filename>.dart`
    pub fn output_path(&self) -> PathBuf {
        let file_name = if self.output_filename.ends_with(".dart") {
            self.output_filename.clone()
        } else {
            format!("{}.dart", self.output_filename)
        };
        self.root.join("lib").join(&self.output_dir).join(file_name)
    }

    /// Package name when package mode is active
    pub fn package(&self) -> Option<&str> {
        if self.package_parameter_enabled {
            self.manifest.name.as_deref()
        } else {
            None
        }
    }

    pub fn has_dependency(&self, capability: Capability) -> bool {
        self.manifest.has_dependency(capability.package())
    }

    pub fn declared_constraint(&self, capability: Capability) -> Option<String> {
        self.manifest.dependency_version(capability.package())
    }

    pub fn snapshot(&self) -> PubspecSnapshot {
        self.manifest.snapshot()
    }

    /// Rendering options; `svg_constraint` is the declared or just-selected one
    pub fn generation_settings(&self, svg_constraint: Option<&str>) -> GenerationSettings {
        GenerationSettings {
            class_name: self.class_name.clone(),
            style: self.style,
            sanitizer: IdentifierSanitizer::new_or_default(&self.split_pattern),
            named_with_parent: self.named_with_parent,
            package: self.package().map(str::to_string),
            flutter_svg_major: svg_constraint.and_then(constraint_major),
        }
    }

    /// Display name for logs: the package name or the directory name
    pub fn display_name(&self) -> String {
        self.manifest
            .name
            .clone()
            .or_else(|| {
                self.root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| self.root.display().to_string())
    }
}
