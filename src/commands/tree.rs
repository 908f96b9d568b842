use std::path::Path;

use anyhow::Result;
use serde_json::json;

use assetgen::config::ModuleConfig;
use assetgen::domain::services::TreeBuilder;
use assetgen::infrastructure::LocalFs;

use crate::ui::terminal::stdout_supports_color;
use crate::ui::views::render_tree;

pub fn cmd_tree(module: &Path, config: Option<&Path>, json: bool) -> Result<bool> {
    let global = super::load_global(config, json);
    let fs = LocalFs::new();
    let module_config = ModuleConfig::load(&fs, module, &global)?;
    let scan = TreeBuilder::new(fs).build(
        &module_config.asset_roots,
        &module_config.root,
        &module_config.path_ignore,
    );

    if json {
        let value = json!({
            "module": module_config.root,
            "tree": scan.root,
            "missing_roots": scan.missing_roots,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_tree(&scan.root, stdout_supports_color()));
        for missing in &scan.missing_roots {
            eprintln!("asset root not found: {}", missing);
        }
    }
    Ok(true)
}
