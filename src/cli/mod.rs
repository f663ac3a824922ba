// src/cli/mod.rs
//! CLI surface and the run pipeline.

pub mod args;
pub mod run;

pub use args::Cli;

use crate::config::Config;

/// Builds the run configuration from parsed arguments plus environment
/// defaults, then applies any local `axescan.toml` overrides.
#[must_use]
pub fn build_config(cli: &Cli) -> Config {
    let mut config = Config::new();
    config.mode = cli.mode;
    if let Some(repo) = &cli.repo_path {
        config.repo_path = repo.clone();
    }
    config.output_dir = cli.output_dir.clone();
    config.verbose = cli.verbose;
    config.load_local_config();
    config
}
