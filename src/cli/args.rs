// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

use crate::config::ScanMode;

#[derive(Parser)]
#[command(name = "axescan", version, about = "WCAG accessibility scanner")]
pub struct Cli {
    /// Scan mode: auto (infer from CI context), all (entire repository),
    /// or affected (changed files only)
    #[arg(long, value_enum, default_value = "auto")]
    pub mode: ScanMode,

    /// Repository path (defaults to GITHUB_WORKSPACE or current directory)
    #[arg(long, value_name = "PATH")]
    pub repo_path: Option<PathBuf>,

    /// Output directory for reports
    #[arg(long, value_name = "PATH", default_value = "./reports")]
    pub output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}
