//! Command-line argument definitions.
use std::path::PathBuf;

use clap::Parser;

/// Command-line entry point for the converter.
#[derive(Parser, Debug)]
#[command(
    name = "transpilex",
    about = "Convert static HTML templates into a backend framework project",
    version = option_env!("TRANSPILEX_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Project name (the output directory name)
    #[arg(required_unless_present = "list_targets")]
    pub project_name: Option<String>,

    /// Target framework (see --list-targets)
    #[arg(required_unless_present = "list_targets")]
    pub target: Option<String>,

    /// Folder containing the source HTML files
    #[arg(long, default_value = "html")]
    pub src: PathBuf,

    /// Assets folder; relative paths are looked up inside --src first
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Directory the project folder is created in
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Settings file (defaults to <src>/transpilex.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip gulp build files (gulpfile.js and gulp scripts)
    #[arg(long)]
    pub no_gulp: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the supported target frameworks and exit
    #[arg(long)]
    pub list_targets: bool,
}
