// src/bin/axescan.rs
use clap::Parser;

use axescan_core::cli::{self, Cli};
use axescan_core::console::{self, Level};
use axescan_core::exit::AxescanExit;

fn main() -> AxescanExit {
    let args = Cli::parse();
    let config = cli::build_config(&args);

    if config.verbose {
        console::status(
            &format!(
                "Config: mode={:?}, repo={}, output={}",
                config.mode,
                config.repo_path.display(),
                config.output_dir.display()
            ),
            Level::Info,
        );
    }

    // Outermost error boundary: anything unhandled below lands here once.
    match cli::run::run(&config) {
        Ok(exit) => exit,
        Err(e) => {
            console::status(&format!("Error: {e:#}"), Level::Error);
            AxescanExit::Error
        }
    }
}
