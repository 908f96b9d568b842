//! Nested (`robust`) style: one container class per directory

use std::collections::{HashMap, HashSet};

use crate::domain::entities::AssetNode;
use crate::domain::value_objects::{Capability, CapabilityAvailability, MediaType};

use super::wrappers::{is_wrapped, render_wrapper, wrapper_type};
use super::{dart_string_literal, effective_asset_path, GenerationSettings, MemberNames, HEADER};

const LINT_IGNORES: &str = "// ignore_for_file: type=lint, unused_import, deprecated_member_use\n";

const WRAPPED_TYPES: [MediaType; 3] = [MediaType::Image, MediaType::Vector, MediaType::Animation];

pub(super) fn render(
    tree: &AssetNode,
    settings: &GenerationSettings,
    availability: CapabilityAvailability,
) -> String {
    let containers = container_names(tree, settings);
    let present: Vec<MediaType> = WRAPPED_TYPES
        .into_iter()
        .filter(|media| tree.contains_media(*media))
        .collect();

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(LINT_IGNORES);
    out.push('\n');
    out.push_str("import 'package:flutter/services.dart';\n");
    out.push_str("import 'package:flutter/widgets.dart';\n");
    for capability in Capability::ALL {
        if present.contains(&capability.media_type()) && availability.is_available(capability) {
            out.push_str(&format!("import '{}';\n", capability.import()));
        }
    }
    out.push('\n');

    out.push_str(&format!("class {} {{\n", settings.class_name));
    out.push_str(&format!("  const {}._();\n", settings.class_name));
    for member in members(tree, settings, &containers, true) {
        out.push('\n');
        out.push_str(&member);
    }
    out.push_str("}\n");

    for dir in tree.directories() {
        let Some(class_name) = containers.get(dir.relative_path()) else {
            continue;
        };
        out.push('\n');
        out.push_str(&format!("class {} {{\n", class_name));
        out.push_str(&format!("  const {}();\n", class_name));
        for member in members(dir, settings, &containers, false) {
            out.push('\n');
            out.push_str(&member);
        }
        out.push_str("}\n");
    }

    for media in present {
        out.push('\n');
        out.push_str(&render_wrapper(media, settings, availability));
    }
    out
}

/// `$`-prefixed class name per directory, keyed by relative path
fn container_names<'t>(
    tree: &'t AssetNode,
    settings: &GenerationSettings,
) -> HashMap<&'t str, String> {
    let mut taken = HashSet::new();
    let mut names = HashMap::new();
    for dir in tree.directories() {
        let base: String = std::iter::once("$".to_string())
            .chain(
                dir.relative_path()
                    .split('/')
                    .map(|segment| settings.sanitizer.to_type_segment(segment)),
            )
            .collect();
        let mut name = base.clone();
        let mut n = 2;
        while !taken.insert(name.clone()) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        names.insert(dir.relative_path(), name);
    }
    names
}

/// Rendered members of one class, in child order
fn members(
    node: &AssetNode,
    settings: &GenerationSettings,
    containers: &HashMap<&str, String>,
    is_root: bool,
) -> Vec<String> {
    let mut names = MemberNames::new();
    let mut rendered = Vec::new();

    for child in node.children() {
        if child.is_directory() {
            let Some(class_name) = containers.get(child.relative_path()) else {
                continue;
            };
            let field = names.claim(settings.sanitizer.to_identifier(child.name()));
            let mut member = format!("  /// Directory path: {}\n", child.relative_path());
            if is_root {
                member.push_str(&format!(
                    "  static const {} {} = {}();\n",
                    class_name, field, class_name
                ));
            } else {
                member.push_str(&format!(
                    "  {} get {} => const {}();\n",
                    class_name, field, class_name
                ));
            }
            rendered.push(member);
            continue;
        }

        let field = names.claim(settings.sanitizer.to_identifier(child.file_name()));
        let media = child.media_type();
        let ty = wrapper_type(media);
        let value = if is_wrapped(media) {
            format!("{}({})", ty, dart_string_literal(child.relative_path()))
        } else {
            dart_string_literal(&effective_asset_path(
                child.relative_path(),
                settings.package.as_deref(),
            ))
        };

        let mut member = format!("  /// File path: {}\n", child.relative_path());
        match (is_root, is_wrapped(media)) {
            (true, _) => member.push_str(&format!("  static const {} {} = {};\n", ty, field, value)),
            (false, true) => {
                member.push_str(&format!("  {} get {} => const {};\n", ty, field, value))
            }
            (false, false) => member.push_str(&format!("  {} get {} => {};\n", ty, field, value)),
        }
        rendered.push(member);
    }
    rendered
}
