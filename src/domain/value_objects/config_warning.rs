//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// Non-fatal configuration warning surfaced to CLI users.
///
/// Produced while loading the global settings file (unknown keys) and while
/// resolving a module's manifest section (bad split pattern, unknown style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown or problematic key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// What is wrong with the key
    pub message: String,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}

impl ConfigWarning {
    /// Warning for a key that the loader does not know
    pub fn unknown_key(key: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        let key = key.into();
        Self {
            message: format!("unknown key '{}'", key),
            key,
            file: file.into(),
            line: None,
            suggestion: None,
        }
    }

    /// Warning for a known key holding an unusable value
    pub fn invalid_value(
        key: impl Into<String>,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
            line: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: attach a line number
    pub fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Builder: attach a suggested key
    pub fn suggest(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}
