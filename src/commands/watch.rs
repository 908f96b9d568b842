use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use assetgen::application::{ConfigChangeCache, GenerateOptions, GenerateUseCase, WatchUseCase};
use assetgen::domain::ports::ManifestWriter;
use assetgen::domain::value_objects::ProjectId;
use assetgen::infrastructure::{
    LocalFs, PubAddManifestWriter, ReportingManifestWriter, SystemCommandRunner,
};

use crate::ui::terminal::stdout_supports_color;
use crate::ui::views::render_watch_event;

pub fn cmd_watch(
    project: &Path,
    install_deps: bool,
    flutter_sdk: Option<PathBuf>,
    config: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let global = super::load_global(config, json);
    let (root, modules) = super::resolve_modules(project, None)?;

    let sdk = flutter_sdk.clone().or_else(|| global.flutter_sdk.clone());
    let reporting = ReportingManifestWriter::new();
    let pub_add = PubAddManifestWriter::new(SystemCommandRunner::new(), sdk);
    let writer: &dyn ManifestWriter = if install_deps {
        &pub_add
    } else {
        &reporting
    };

    let generate = GenerateUseCase::new(LocalFs::new(), SystemCommandRunner::new(), writer, global)
        .with_options(GenerateOptions::new().with_flutter_sdk(flutter_sdk));
    let project_id = ProjectId::from_root(&root);
    let mut use_case = WatchUseCase::new(
        generate,
        root,
        project_id,
        Arc::new(ConfigChangeCache::new()),
    );

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl-C handler")?;

    let color = !json && stdout_supports_color();
    use_case.start(&modules, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else if let Some(line) = render_watch_event(&event, color) {
            println!("{}", line);
        }
    })?;

    Ok(true)
}
