use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;

use assetgen::application::{GenerateOptions, GenerateUseCase};
use assetgen::domain::services::select_version;
use assetgen::domain::value_objects::Capability;
use assetgen::infrastructure::{LocalFs, ReportingManifestWriter, SystemCommandRunner};

use crate::ui::terminal::stdout_supports_color;
use crate::ui::views::render_versions;

pub fn cmd_versions(
    module: &Path,
    flutter_sdk: Option<PathBuf>,
    config: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let global = super::load_global(config, json);
    let writer = ReportingManifestWriter::new();
    let use_case = GenerateUseCase::new(LocalFs::new(), SystemCommandRunner::new(), &writer, global)
        .with_options(GenerateOptions::new().with_flutter_sdk(flutter_sdk));

    let module_config = use_case.load_module(module)?;
    let runtime = use_case.resolve_runtime(&module_config);

    let constraints: Vec<(Capability, bool, String)> = Capability::ALL
        .into_iter()
        .map(|capability| match module_config.declared_constraint(capability) {
            Some(declared) => (capability, true, declared),
            None if module_config.has_dependency(capability) => {
                (capability, true, "any".to_string())
            }
            None => (
                capability,
                false,
                select_version(capability, runtime.map(|r| r.version)).to_string(),
            ),
        })
        .collect();

    if json {
        let packages: serde_json::Map<String, serde_json::Value> = constraints
            .iter()
            .map(|(capability, declared, constraint)| {
                (
                    capability.package().to_string(),
                    json!({ "constraint": constraint, "declared": declared }),
                )
            })
            .collect();
        let value = json!({
            "module": module_config.root,
            "flutter": runtime,
            "packages": packages,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!(
            "{}",
            render_versions(
                &module_config.display_name(),
                runtime.as_ref(),
                &constraints,
                stdout_supports_color(),
            )
        );
    }
    Ok(true)
}
