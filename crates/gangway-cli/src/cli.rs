//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use gangway_bundler::BuildMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gangway",
    version,
    about = "ESM bundling driver for packages mixing CommonJS and ESM sources"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bundle the package's main entry and its declared re-exports
    Build(BuildArgs),
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Project directory containing the package to bundle
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Config file path (defaults to <project-dir>/gangway.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Persist each export's generated config for inspection
    #[arg(long)]
    pub report: bool,

    /// Build mode (defaults to the NODE_ENV environment signal)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Backend bundler command to invoke per entry
    #[arg(long, default_value = "webpack")]
    pub engine: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => BuildMode::Development,
            ModeArg::Production => BuildMode::Production,
        }
    }
}
