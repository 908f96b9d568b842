//! Human-readable renderings of command results

use crossterm::style::{Color, Stylize};

use assetgen::application::{ModuleReport, ProjectReport, WatchEvent, WriteStatus};
use assetgen::domain::entities::AssetNode;
use assetgen::domain::ports::DependencyRequestStatus;
use assetgen::domain::services::ResolvedVersion;
use assetgen::domain::value_objects::{Capability, ConfigWarning};
use assetgen::infrastructure::manifest::pub_add_command;

use crate::ui::theme::{colors, icons};

fn paint(text: &str, color: Color, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

pub fn render_config_warnings(warnings: &[ConfigWarning], supports_color: bool) -> String {
    let mut out = String::new();
    for warning in warnings {
        out.push_str(&format!(
            "{} {}\n",
            paint(icons::WARNING, colors::WARNING, supports_color),
            warning
        ));
    }
    out
}

fn render_module(module: &ModuleReport, supports_color: bool) -> String {
    let mut out = String::new();
    let (icon, color, verb) = match module.status {
        WriteStatus::Written => (icons::SUCCESS, colors::SUCCESS, "generated"),
        WriteStatus::WouldWrite => (icons::WARNING, colors::WARNING, "would generate"),
        WriteStatus::Unchanged => (icons::UNCHANGED, colors::DIM, "unchanged"),
    };
    out.push_str(&format!(
        "{} {} {} {} ({} assets)\n",
        paint(icon, color, supports_color),
        module.name,
        verb,
        module.output.display(),
        module.leaf_count
    ));

    if !module.missing_roots.is_empty() {
        out.push_str(&format!(
            "  {} asset roots not found: {}\n",
            paint(icons::WARNING, colors::WARNING, supports_color),
            module.missing_roots.join(", ")
        ));
    }

    if !module.dependencies.is_empty() {
        match module.dependency_status {
            Some(DependencyRequestStatus::Installed) => {
                for (package, constraint) in &module.dependencies {
                    out.push_str(&format!("  added {} {}\n", package, constraint));
                }
            }
            Some(DependencyRequestStatus::Reported) | None => {
                out.push_str(&format!(
                    "  {} generated code needs: {}\n",
                    paint(icons::WARNING, colors::WARNING, supports_color),
                    pub_add_command(&module.dependencies)
                ));
            }
        }
    }
    out
}

pub fn render_project_report(report: &ProjectReport, supports_color: bool) -> String {
    let mut out = String::new();
    for module in &report.modules {
        out.push_str(&render_module(module, supports_color));
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "{} {}: {}\n",
            paint(icons::ERROR, colors::ERROR, supports_color),
            failure.module.display(),
            failure.error
        ));
    }

    let would_write = report
        .modules
        .iter()
        .filter(|m| m.status == WriteStatus::WouldWrite)
        .count();
    let mut summary = format!(
        "{} written, {} unchanged",
        report.written(),
        report.unchanged()
    );
    if would_write > 0 {
        summary.push_str(&format!(", {} would change", would_write));
    }
    if !report.failures.is_empty() {
        summary.push_str(&format!(", {} failed", report.failures.len()));
    }
    out.push('\n');
    out.push_str(&paint(&summary, colors::INFO, supports_color));
    out.push('\n');
    out
}

/// Indented asset tree with media types
pub fn render_tree(root: &AssetNode, supports_color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", root.name()));
    render_children(root, 1, supports_color, &mut out);
    out
}

fn render_children(node: &AssetNode, depth: usize, supports_color: bool, out: &mut String) {
    let indent = "  ".repeat(depth);
    for child in node.children() {
        if child.is_directory() {
            out.push_str(&format!("{}{}/\n", indent, child.file_name()));
            render_children(child, depth + 1, supports_color, out);
        } else {
            let kind = child.media_type().to_string();
            out.push_str(&format!(
                "{}{}  {}\n",
                indent,
                child.file_name(),
                paint(&kind, colors::DIM, supports_color)
            ));
        }
    }
}

/// Runtime version and the constraint chosen per capability
pub fn render_versions(
    module: &str,
    runtime: Option<&ResolvedVersion>,
    constraints: &[(Capability, bool, String)],
    supports_color: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", module));
    match runtime {
        Some(resolved) => out.push_str(&format!(
            "  flutter {} (from {})\n",
            resolved.version, resolved.source
        )),
        None => out.push_str(&format!(
            "  flutter {}\n",
            paint("unknown", colors::WARNING, supports_color)
        )),
    }
    for (capability, declared, constraint) in constraints {
        let origin = if *declared { "declared" } else { "selected" };
        out.push_str(&format!(
            "  {} {}  {}\n",
            capability.package(),
            constraint,
            paint(origin, colors::DIM, supports_color)
        ));
    }
    out
}

pub fn render_watch_event(event: &WatchEvent, supports_color: bool) -> Option<String> {
    let line = match event {
        WatchEvent::WatchStarted { project, modules } => format!(
            "{} Watching {} ({} modules), Ctrl-C to stop",
            paint(icons::WATCH, colors::INFO, supports_color),
            project,
            modules.len()
        ),
        WatchEvent::ModuleChanged { .. } => return None,
        WatchEvent::Generated {
            module,
            output,
            status,
        } => match status {
            WriteStatus::Unchanged => format!(
                "{} {} unchanged",
                paint(icons::UNCHANGED, colors::DIM, supports_color),
                module
            ),
            _ => format!(
                "{} {} -> {}",
                paint(icons::SUCCESS, colors::SUCCESS, supports_color),
                module,
                output
            ),
        },
        WatchEvent::Skipped { module, reason } => format!(
            "{} {} skipped: {}",
            paint(icons::UNCHANGED, colors::DIM, supports_color),
            module,
            reason
        ),
        WatchEvent::Error { module, message } => format!(
            "{} {}{}",
            paint(icons::ERROR, colors::ERROR, supports_color),
            module
                .as_ref()
                .map(|m| format!("{}: ", m))
                .unwrap_or_default(),
            message
        ),
        WatchEvent::Shutdown => "Stopped.".to_string(),
    };
    Some(line)
}
