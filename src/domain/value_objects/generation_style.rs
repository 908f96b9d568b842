//! Generation style value object - the shape of the rendered accessor file

use serde::Serialize;

/// Output shape selected by the `style` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStyle {
    /// Nested typed containers with media wrappers
    #[default]
    Robust,
    /// One flat class of string constants
    Legacy,
}

impl GenerationStyle {
    /// Parse a configured style name (`nested` is an alias of `robust`)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "robust" | "nested" => Some(GenerationStyle::Robust),
            "legacy" => Some(GenerationStyle::Legacy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStyle::Robust => "robust",
            GenerationStyle::Legacy => "legacy",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, GenerationStyle::Legacy)
    }
}

impl std::fmt::Display for GenerationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
