//! Pubspec manifest model
//!
//! `pubspec.yaml` is parsed once, here, into typed sections. Nothing past this
//! boundary looks at raw YAML.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_yaml_ng::Value;

use crate::domain::value_objects::{Capability, ConfigWarning, GenerationStyle, PubspecSnapshot};
use crate::error::{AssetGenError, AssetGenResult};

use super::loader::suggest_from;
use super::types::defaults;

/// Name of the generator's section in `pubspec.yaml`
pub const GENERATOR_SECTION: &str = "flutter_assets_generator";

const GENERATOR_KEYS: &[&str] = &[
    "output_dir",
    "class_name",
    "output_filename",
    "filename_split_pattern",
    "path_ignore",
    "auto_detection",
    "named_with_parent",
    "style",
    "package_parameter_enabled",
];

/// Typed view of a module's `pubspec.yaml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PubspecManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment: Environment,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flutter: FlutterSection,
    #[serde(
        default,
        rename = "flutter_assets_generator",
        deserialize_with = "null_as_default"
    )]
    pub generator: GeneratorSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub sdk: Option<String>,
    #[serde(default)]
    pub flutter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FlutterSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<AssetEntry>,
}

/// One `flutter.assets` entry: a bare path or a map with `path`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AssetEntry {
    Path(String),
    Detailed { path: String },
}

impl AssetEntry {
    pub fn path(&self) -> &str {
        match self {
            AssetEntry::Path(path) | AssetEntry::Detailed { path } => path,
        }
    }
}

/// The `flutter_assets_generator` section, every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorSection {
    pub output_dir: Option<String>,
    pub class_name: Option<String>,
    pub output_filename: Option<String>,
    pub filename_split_pattern: Option<String>,
    pub path_ignore: Option<Vec<String>>,
    pub auto_detection: Option<bool>,
    pub named_with_parent: Option<bool>,
    pub style: Option<String>,
    pub package_parameter_enabled: Option<bool>,
}

/// No content besides whitespace and comments
fn is_blank_yaml(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PubspecManifest {
    /// Parse manifest text
    pub fn parse(content: &str, file: &Path) -> AssetGenResult<Self> {
        Ok(Self::parse_with_warnings(content, file)?.0)
    }

    /// Parse manifest text, warning about unknown keys in the generator section
    pub fn parse_with_warnings(
        content: &str,
        file: &Path,
    ) -> AssetGenResult<(Self, Vec<ConfigWarning>)> {
        if is_blank_yaml(content) {
            return Ok((Self::default(), Vec::new()));
        }

        let mut ignored: Vec<String> = Vec::new();
        let deserializer = serde_yaml_ng::Deserializer::from_str(content);
        let manifest: PubspecManifest =
            serde_ignored::deserialize(deserializer, |path| ignored.push(path.to_string()))
                .map_err(|e| AssetGenError::ConfigParse {
                    file: file.to_path_buf(),
                    message: e.to_string(),
                })?;

        let prefix = format!("{}.", GENERATOR_SECTION);
        let warnings = ignored
            .iter()
            .filter_map(|path| path.strip_prefix(&prefix))
            .map(|key| {
                ConfigWarning::unknown_key(key, file).suggest(suggest_from(key, GENERATOR_KEYS))
            })
            .collect();

        Ok((manifest, warnings))
    }

    /// Configured asset roots, in declaration order
    pub fn asset_paths(&self) -> Vec<String> {
        self.flutter
            .assets
            .iter()
            .map(|entry| entry.path().to_string())
            .collect()
    }

    /// Whether the package is declared under `dependencies`
    pub fn has_dependency(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }

    /// Declared version string; `None` for path/git/sdk or missing entries
    pub fn dependency_version(&self, package: &str) -> Option<String> {
        match self.dependencies.get(package)? {
            Value::String(version) => Some(version.clone()),
            Value::Number(version) => Some(version.to_string()),
            _ => None,
        }
    }

    /// Effective style; unknown names read as the default
    pub fn style(&self) -> GenerationStyle {
        self.generator
            .style
            .as_deref()
            .and_then(GenerationStyle::parse)
            .unwrap_or_default()
    }

    /// Comparable projection of the fields that affect generation
    ///
    /// Built from the manifest and hard-coded defaults only.
    pub fn snapshot(&self) -> PubspecSnapshot {
        let section = &self.generator;
        PubspecSnapshot {
            package_name: self.name.clone(),
            asset_paths: self.asset_paths(),
            output_dir: section
                .output_dir
                .clone()
                .unwrap_or_else(|| defaults::OUTPUT_DIR.to_string()),
            class_name: section
                .class_name
                .clone()
                .unwrap_or_else(|| defaults::CLASS_NAME.to_string()),
            output_filename: section
                .output_filename
                .clone()
                .unwrap_or_else(|| defaults::OUTPUT_FILENAME.to_string()),
            filename_split_pattern: section
                .filename_split_pattern
                .clone()
                .unwrap_or_else(|| defaults::SPLIT_PATTERN.to_string()),
            path_ignore: section.path_ignore.clone().unwrap_or_default(),
            auto_detection: section
                .auto_detection
                .unwrap_or(defaults::SNAPSHOT_AUTO_DETECTION),
            named_with_parent: section
                .named_with_parent
                .unwrap_or(defaults::NAMED_WITH_PARENT),
            package_parameter_enabled: section
                .package_parameter_enabled
                .unwrap_or(defaults::PACKAGE_PARAMETER_ENABLED),
            style: self.style(),
            flutter_svg_version: self.dependency_version(Capability::Vector.package()),
            lottie_version: self.dependency_version(Capability::Animation.package()),
            flutter_constraint: self.environment.flutter.clone(),
            dart_constraint: self.environment.sdk.clone(),
        }
    }
}
