use std::path::{Path, PathBuf};

use anyhow::Result;

use assetgen::application::{GenerateOptions, GenerateUseCase};
use assetgen::domain::ports::ManifestWriter;
use assetgen::infrastructure::{
    LocalFs, PubAddManifestWriter, ReportingManifestWriter, SystemCommandRunner,
};

use crate::ui::terminal::stdout_supports_color;
use crate::ui::views::render_project_report;

pub struct GenerateArgs {
    pub project: PathBuf,
    pub module: Option<PathBuf>,
    pub dry_run: bool,
    pub install_deps: bool,
    pub flutter_sdk: Option<PathBuf>,
}

pub fn cmd_generate(args: GenerateArgs, config: Option<&Path>, json: bool) -> Result<bool> {
    let global = super::load_global(config, json);
    let (_, modules) = super::resolve_modules(&args.project, args.module.as_deref())?;

    let sdk = args.flutter_sdk.clone().or_else(|| global.flutter_sdk.clone());
    let reporting = ReportingManifestWriter::new();
    let pub_add = PubAddManifestWriter::new(SystemCommandRunner::new(), sdk);
    let writer: &dyn ManifestWriter = if args.install_deps {
        &pub_add
    } else {
        &reporting
    };

    let options = GenerateOptions::new()
        .with_dry_run(args.dry_run)
        .with_flutter_sdk(args.flutter_sdk);
    let use_case = GenerateUseCase::new(LocalFs::new(), SystemCommandRunner::new(), writer, global)
        .with_options(options);

    let report = use_case.generate_all(&modules);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_project_report(&report, stdout_supports_color()));
    }

    Ok(report.is_success())
}
