//! Global settings loading: file lookup, unknown-key warnings, env overrides

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AssetGenError, AssetGenResult};

use super::types::GlobalSettings;
use super::ConfigWarning;

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "ASSETGEN_CONFIG";
/// Environment variable overriding the Flutter SDK path
pub const FLUTTER_SDK_ENV: &str = "ASSETGEN_FLUTTER_SDK";
/// Flutter's own SDK root variable, used when `ASSETGEN_FLUTTER_SDK` is unset
pub const FLUTTER_ROOT_ENV: &str = "FLUTTER_ROOT";
/// Environment variable overriding auto-detection
pub const AUTO_DETECTION_ENV: &str = "ASSETGEN_AUTO_DETECTION";

/// Keys accepted in the global settings file
const KNOWN_KEYS: &[&str] = &[
    "class_name",
    "file_name",
    "output_dir",
    "filename_split_pattern",
    "named_with_parent",
    "auto_detection",
    "package_parameter_enabled",
    "flutter_sdk",
];

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AssetGenResult<(GlobalSettings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let settings: GlobalSettings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AssetGenError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning::unknown_key(key.clone(), path)
                .at_line(find_line_number(&content, &key))
                .suggest(suggest_key(&key))
        })
        .collect();

    Ok((settings, warnings))
}

/// Settings file to read: explicit path, then `ASSETGEN_CONFIG`, then the user config dir
pub fn settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("assetgen").join("config.toml"))
}

/// Load the global tier, falling back to defaults when missing or malformed
///
/// An explicitly named file that does not exist is reported; a missing
/// default file is not.
pub fn load_or_default(explicit: Option<&Path>) -> (GlobalSettings, Vec<ConfigWarning>) {
    let Some(path) = settings_path(explicit) else {
        return (with_env_overrides(GlobalSettings::default()), Vec::new());
    };

    if !path.exists() {
        if explicit.is_some() {
            warn!(path = %path.display(), "settings file not found, using defaults");
        } else {
            debug!(path = %path.display(), "no global settings file");
        }
        return (with_env_overrides(GlobalSettings::default()), Vec::new());
    }

    match load_with_warnings(&path) {
        Ok((settings, warnings)) => {
            debug!(path = %path.display(), "loaded global settings");
            (with_env_overrides(settings), warnings)
        }
        Err(err) => {
            warn!(error = %err, "ignoring global settings");
            (with_env_overrides(GlobalSettings::default()), Vec::new())
        }
    }
}

/// Apply environment variable overrides (ASSETGEN_* prefix)
pub fn with_env_overrides(settings: GlobalSettings) -> GlobalSettings {
    apply_env(settings, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub fn apply_env(
    mut settings: GlobalSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> GlobalSettings {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(sdk) = non_empty(FLUTTER_SDK_ENV).or_else(|| non_empty(FLUTTER_ROOT_ENV)) {
        settings.flutter_sdk = Some(PathBuf::from(sdk));
    }

    if let Some(value) = non_empty(AUTO_DETECTION_ENV) {
        let value = value.trim().to_lowercase();
        settings.auto_detection = Some(value != "false" && value != "0" && value != "no");
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    suggest_from(unknown, KNOWN_KEYS)
}

/// Closest candidate within edit distance 2
pub(crate) fn suggest_from(unknown: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
