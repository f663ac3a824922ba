// src/cli/run.rs
//! The locate -> scan -> report pipeline, one file at a time.

use anyhow::Result;

use crate::config::Config;
use crate::console::{self, Level};
use crate::discovery;
use crate::exit::AxescanExit;
use crate::git;
use crate::report;
use crate::scanner;
use crate::types::ReportAggregate;

/// Executes a full scan run.
///
/// # Errors
/// Returns error if the config is invalid or a report cannot be written.
/// Discovery and per-file scan failures never surface here; they are
/// recorded in the aggregate.
pub fn run(config: &Config) -> Result<AxescanExit> {
    config.validate()?;

    let repo_name = git::repo_name(&config.repo_path);
    console::status("Starting WCAG accessibility scan", Level::Success);
    console::status(&format!("Repository: {repo_name}"), Level::Info);
    console::status(
        &format!("Output: {}", config.output_dir.display()),
        Level::Info,
    );

    let targets = discovery::locate(config);

    let mut aggregate = ReportAggregate::default();
    if targets.is_empty() {
        console::status(
            &format!("No HTML files found to scan in {repo_name}. No tests will be executed."),
            Level::Warn,
        );
    } else {
        console::status(
            &format!("Scanning {} files with headless browser...", targets.len()),
            Level::Info,
        );
        for (i, target) in targets.iter().enumerate() {
            console::progress(i + 1, targets.len(), &format!("Scanning {}", target.relative));
            let outcome = scanner::scan_file(config, target);
            aggregate.insert(target.relative.clone(), outcome);
        }
    }

    console::status("Generating reports...", Level::Info);
    let (json_path, html_path) = report::write_reports(&aggregate, &repo_name, &config.output_dir)?;
    console::status(&format!("JSON report: {}", json_path.display()), Level::Success);
    console::status(&format!("HTML report: {}", html_path.display()), Level::Success);
    console::status("Scan completed!", Level::Success);

    Ok(AxescanExit::Success)
}
