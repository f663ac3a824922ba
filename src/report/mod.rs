// src/report/mod.rs
//! Report Renderer: turns the aggregate into `report.json` and
//! `report.html` in the output directory.

pub mod escape;
pub mod html;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::console::{self, Level};
use crate::types::ReportAggregate;

/// Writes both artifacts. Report-generation errors propagate; everything
/// upstream of this point has already been recorded per-file.
///
/// # Errors
/// Returns error if the output directory cannot be created or either
/// artifact cannot be serialized or written.
pub fn write_reports(
    aggregate: &ReportAggregate,
    repo_name: &str,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let json_path = write_json(aggregate, out_dir)?;
    let html_path = write_html(aggregate, repo_name, out_dir)?;
    Ok((json_path, html_path))
}

/// Writes the lossless JSON mapping of relative path -> outcome.
///
/// # Errors
/// Returns error on serialization or write failure.
pub fn write_json(aggregate: &ReportAggregate, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join("report.json");
    let pretty = serde_json::to_string_pretty(&aggregate.results)
        .context("serializing JSON report")?;
    fs::write(&path, pretty).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Renders and writes the HTML report, then sanity-checks the output.
///
/// # Errors
/// Returns error on write failure.
pub fn write_html(aggregate: &ReportAggregate, repo_name: &str, out_dir: &Path) -> Result<PathBuf> {
    console::status("Generating HTML report...", Level::Info);
    let rendered = html::render(aggregate, repo_name);
    let path = out_dir.join("report.html");
    fs::write(&path, &rendered.html).with_context(|| format!("writing {}", path.display()))?;

    // Plausibility only: a mismatch means a rendering bug, not a failed run.
    let lines = rendered.html.lines().count();
    if (lines < 100 && !aggregate.is_empty()) || rendered.section_count != aggregate.len() {
        console::status(
            &format!(
                "HTML may be truncated: expected {} file sections, rendered {} ({lines} lines)",
                aggregate.len(),
                rendered.section_count
            ),
            Level::Warn,
        );
    }

    console::status(
        &format!("HTML report generated: {} ({lines} lines)", path.display()),
        Level::Success,
    );
    Ok(path)
}
