//! Identifier Sanitizer
//!
//! Turns arbitrary file and directory names into legal, lower-camel-case Dart
//! identifiers. Directory-derived type names and leaf-derived member names
//! come from the same rules but live in separate namespaces.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Split pattern used when none is configured (or the configured one is invalid)
pub const DEFAULT_SPLIT_PATTERN: &str = "[-_]";

/// Result for names that sanitize to nothing
pub const PLACEHOLDER: &str = "unnamed";

/// Reserved words and built-in identifiers of the output language
pub const DART_KEYWORDS: &[&str] = &[
    "abstract", "as", "assert", "async", "await", "base", "break", "case", "catch", "class",
    "const", "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum",
    "export", "extends", "extension", "external", "factory", "false", "final", "finally", "for",
    "Function", "get", "hide", "if", "implements", "import", "in", "interface", "is", "late",
    "library", "mixin", "new", "null", "of", "on", "operator", "part", "required", "rethrow",
    "return", "sealed", "set", "show", "static", "super", "switch", "sync", "this", "throw",
    "true", "try", "type", "typedef", "var", "void", "when", "while", "with", "yield",
];

pub fn is_dart_keyword(word: &str) -> bool {
    DART_KEYWORDS.contains(&word)
}

fn default_split() -> &'static Regex {
    static SPLIT: OnceLock<Regex> = OnceLock::new();
    SPLIT.get_or_init(|| Regex::new(DEFAULT_SPLIT_PATTERN).expect("invalid default split regex"))
}

/// Sanitizer bound to one split pattern
#[derive(Debug, Clone)]
pub struct IdentifierSanitizer {
    split: Regex,
}

impl Default for IdentifierSanitizer {
    fn default() -> Self {
        Self {
            split: default_split().clone(),
        }
    }
}

impl IdentifierSanitizer {
    /// Compile a sanitizer for the given split pattern
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            split: Regex::new(pattern)?,
        })
    }

    /// Sanitizer for `pattern`, or the default one when it does not compile
    pub fn new_or_default(pattern: &str) -> Self {
        match Self::new(pattern) {
            Ok(sanitizer) => sanitizer,
            Err(err) => {
                tracing::warn!(pattern, error = %err, "invalid filename split pattern, using default");
                Self::default()
            }
        }
    }

    pub fn pattern(&self) -> &str {
        self.split.as_str()
    }

    /// Lower-camel-case identifier for `raw`; never empty
    pub fn to_identifier(&self, raw: &str) -> String {
        let camel = self.camel_case(raw);
        if camel.is_empty() {
            return PLACEHOLDER.to_string();
        }
        if is_dart_keyword(&camel) {
            format!("{camel}_")
        } else {
            camel
        }
    }

    /// PascalCase segment for type names (no keyword escaping needed)
    pub fn to_type_segment(&self, raw: &str) -> String {
        let camel = self.camel_case(raw);
        if camel.is_empty() {
            return upper_first(PLACEHOLDER);
        }
        upper_first(&camel)
    }

    fn camel_case(&self, raw: &str) -> String {
        let base: String = raw
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| *c != '@')
            .collect();

        let segments: Vec<&str> = self
            .split
            .split(&base)
            .flat_map(|part| part.split(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|segment| !segment.is_empty())
            .collect();

        let mut out = String::with_capacity(base.len());
        for (index, segment) in segments.iter().enumerate() {
            if index == 0 {
                out.push_str(&lower_first(segment));
            } else {
                out.push_str(&upper_first(segment));
            }
        }

        if out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, 'a');
        }
        out
    }
}

/// Identifier for `raw` with the default split pattern
pub fn to_identifier(raw: &str) -> String {
    IdentifierSanitizer::default().to_identifier(raw)
}

fn lower_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
