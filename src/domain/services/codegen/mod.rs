//! Code Generator
//!
//! Renders an asset tree into Dart accessor source. Two styles exist:
//! nested typed containers (`robust`) and one flat constant class (`legacy`).
//! Rendering is a pure function of (tree, settings, capability availability),
//! so identical inputs always produce byte-identical text.

mod legacy;
mod nested;
mod wrappers;


use std::collections::HashSet;

use crate::domain::entities::AssetNode;
use crate::domain::services::identifier::IdentifierSanitizer;
use crate::domain::value_objects::{CapabilityAvailability, GenerationStyle};

/// Fixed header at the top of every generated file
pub const HEADER: &str = "// GENERATED CODE - DO NOT MODIFY BY HAND\n\
// Generated by assetgen. Edits are overwritten on the next generation.\n";

/// Member names that would shadow `Object` members in Dart
const OBJECT_MEMBERS: &[&str] = &["hashCode", "runtimeType", "toString", "noSuchMethod"];

/// Rendering options resolved for one module
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub class_name: String,
    pub style: GenerationStyle,
    pub sanitizer: IdentifierSanitizer,
    /// Legacy style: prefix leaf names with their parent directory
    pub named_with_parent: bool,
    /// Package name when package-parameter mode is active
    pub package: Option<String>,
    /// Major version of the effective `flutter_svg` constraint
    pub flutter_svg_major: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            class_name: "Assets".to_string(),
            style: GenerationStyle::Robust,
            sanitizer: IdentifierSanitizer::default(),
            named_with_parent: true,
            package: None,
            flutter_svg_major: None,
        }
    }
}

/// Renders accessor source for one module
#[derive(Debug, Clone)]
pub struct CodeGenerator<'a> {
    settings: &'a GenerationSettings,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(settings: &'a GenerationSettings) -> Self {
        Self { settings }
    }

    pub fn generate(&self, tree: &AssetNode, availability: CapabilityAvailability) -> String {
        match self.settings.style {
            GenerationStyle::Robust => nested::render(tree, self.settings, availability),
            GenerationStyle::Legacy => legacy::render(tree, self.settings),
        }
    }
}

/// Path an asset is loaded from at runtime
///
/// Package mode prefixes `packages/<name>/`; the stored relative path is left
/// untouched so the prefix can be dropped again.
pub fn effective_asset_path(relative_path: &str, package: Option<&str>) -> String {
    match package {
        Some(package) => format!("packages/{}/{}", package, relative_path),
        None => relative_path.to_string(),
    }
}

/// Single-quoted Dart string literal
pub fn dart_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Names already taken inside one Dart class
#[derive(Debug, Default)]
pub(crate) struct MemberNames {
    used: HashSet<String>,
}

impl MemberNames {
    pub(crate) fn new() -> Self {
        Self {
            used: OBJECT_MEMBERS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub(crate) fn is_taken(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Take `base`, or `base2`, `base3`, ... when it is taken
    pub(crate) fn claim(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
