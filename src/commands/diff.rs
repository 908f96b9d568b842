use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use assetgen::application::{GenerateOptions, GenerateUseCase};
use assetgen::domain::ports::FileSystem;
use assetgen::infrastructure::{LocalFs, ReportingManifestWriter, SystemCommandRunner};

use crate::ui::diff::render_unified_diff;
use crate::ui::terminal::stdout_supports_color;

const CONTEXT_LINES: usize = 3;

#[derive(Debug, Serialize)]
struct ModuleDiff {
    module: PathBuf,
    output: PathBuf,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    diff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn cmd_diff(
    project: &Path,
    module: Option<&Path>,
    config: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let global = super::load_global(config, json);
    let (root, modules) = super::resolve_modules(project, module)?;

    let fs = LocalFs::new();
    let writer = ReportingManifestWriter::new();
    let use_case = GenerateUseCase::new(fs, SystemCommandRunner::new(), &writer, global)
        .with_options(GenerateOptions::new().with_dry_run(true));
    let color = !json && stdout_supports_color();

    let mut diffs = Vec::new();
    for module in &modules {
        let entry = match use_case.plan_module(module) {
            Ok(plan) => {
                let output = plan.output_path();
                let current = match fs.read_to_string(&output) {
                    Ok(text) => text,
                    Err(err) if err.is_not_found() => String::new(),
                    Err(err) => return Err(err.into()),
                };
                let changed = current != plan.content;
                let label = output.strip_prefix(&root).unwrap_or(&output);
                let diff = changed.then(|| {
                    render_unified_diff(
                        &label.display().to_string(),
                        &current,
                        &plan.content,
                        CONTEXT_LINES,
                        color,
                    )
                });
                ModuleDiff {
                    module: module.clone(),
                    output,
                    changed,
                    diff,
                    error: None,
                }
            }
            Err(err) => ModuleDiff {
                module: module.clone(),
                output: PathBuf::new(),
                changed: false,
                diff: None,
                error: Some(err.to_string()),
            },
        };
        diffs.push(entry);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&diffs)?);
    } else {
        for entry in &diffs {
            match (&entry.error, &entry.diff) {
                (Some(error), _) => eprintln!("{}: {}", entry.module.display(), error),
                (None, Some(diff)) => print!("{}", diff),
                (None, None) => println!("{}: no changes", entry.output.display()),
            }
        }
    }

    Ok(diffs.iter().all(|entry| entry.error.is_none()))
}
