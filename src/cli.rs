use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// assetgen - typed Flutter asset accessors, kept in sync with the asset tree
#[derive(Parser, Debug)]
#[command(name = "assetgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output (JSON, NDJSON for watch)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Global settings file (defaults to <config dir>/assetgen/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate accessors for every module of a project
    Generate {
        /// Project directory to search for pubspec.yaml files
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Generate a single module instead
        #[arg(short, long, conflicts_with = "project")]
        module: Option<PathBuf>,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Run `flutter pub add` for dependencies the generated code needs
        #[arg(long)]
        install_deps: bool,

        /// Flutter SDK used to resolve the runtime version
        #[arg(long, value_name = "DIR")]
        flutter_sdk: Option<PathBuf>,
    },

    /// Generate once, then regenerate as assets and manifests change
    Watch {
        /// Project directory to watch
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Run `flutter pub add` for dependencies the generated code needs
        #[arg(long)]
        install_deps: bool,

        /// Flutter SDK used to resolve the runtime version
        #[arg(long, value_name = "DIR")]
        flutter_sdk: Option<PathBuf>,
    },

    /// Show how generated output would change, without writing
    Diff {
        /// Project directory to search for pubspec.yaml files
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Diff a single module instead
        #[arg(short, long, conflicts_with = "project")]
        module: Option<PathBuf>,
    },

    /// Print the scanned asset tree of a module
    Tree {
        /// Module directory (holding pubspec.yaml)
        #[arg(short, long, default_value = ".")]
        module: PathBuf,
    },

    /// Print the resolved Flutter version and dependency constraints
    Versions {
        /// Module directory (holding pubspec.yaml)
        #[arg(short, long, default_value = ".")]
        module: PathBuf,

        /// Flutter SDK used to resolve the runtime version
        #[arg(long, value_name = "DIR")]
        flutter_sdk: Option<PathBuf>,
    },
}
