//! assetgen - typed Flutter asset accessors, kept in sync with the asset tree

mod cli;
mod commands;
mod logging;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::generate::GenerateArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let json = cli.json;
    let config = cli.config.as_deref();

    let success = match cli.command {
        Commands::Generate {
            project,
            module,
            dry_run,
            install_deps,
            flutter_sdk,
        } => commands::generate::cmd_generate(
            GenerateArgs {
                project,
                module,
                dry_run,
                install_deps,
                flutter_sdk,
            },
            config,
            json,
        )?,
        Commands::Watch {
            project,
            install_deps,
            flutter_sdk,
        } => commands::watch::cmd_watch(&project, install_deps, flutter_sdk, config, json)?,
        Commands::Diff { project, module } => {
            commands::diff::cmd_diff(&project, module.as_deref(), config, json)?
        }
        Commands::Tree { module } => commands::tree::cmd_tree(&module, config, json)?,
        Commands::Versions {
            module,
            flutter_sdk,
        } => commands::versions::cmd_versions(&module, flutter_sdk, config, json)?,
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
