//! Legacy style: a single flat class of path constants

use crate::domain::entities::AssetNode;

use super::{dart_string_literal, effective_asset_path, GenerationSettings, MemberNames, HEADER};

pub(super) fn render(tree: &AssetNode, settings: &GenerationSettings) -> String {
    let mut leaves = Vec::new();
    collect(tree, None, &mut leaves);

    let mut names = MemberNames::new();
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("// ignore_for_file: type=lint\n\n");
    out.push_str(&format!("class {} {{\n", settings.class_name));
    out.push_str(&format!("  {}._();\n", settings.class_name));

    if !leaves.is_empty() {
        out.push('\n');
    }
    for (parent, leaf) in leaves {
        let raw = match parent {
            Some(parent) if settings.named_with_parent => format!("{}_{}", parent, leaf.name()),
            _ => leaf.name().to_string(),
        };
        let base = settings.sanitizer.to_identifier(&raw);
        let name = match leaf.extension() {
            Some(ext) if names.is_taken(&base) => {
                names.claim(settings.sanitizer.to_identifier(&format!("{}_{}", raw, ext)))
            }
            _ => names.claim(base),
        };
        let path = effective_asset_path(leaf.relative_path(), settings.package.as_deref());
        out.push_str(&format!(
            "  static const String {} = {};\n",
            name,
            dart_string_literal(&path)
        ));
    }
    out.push_str("}\n");
    out
}

/// Leaves with the name of their parent directory (none at the root)
fn collect<'t>(
    node: &'t AssetNode,
    parent: Option<&'t str>,
    out: &mut Vec<(Option<&'t str>, &'t AssetNode)>,
) {
    for child in node.children() {
        if child.is_directory() {
            collect(child, Some(child.name()), out);
        } else {
            out.push((parent, child));
        }
    }
}
