// src/scanner.rs
//! Scan Dispatcher: one terminal outcome per file.
//!
//! Per-file flow: primary browser-automation attempt, then on any failure
//! a single unconditional heuristic fallback. Nothing raises past this
//! boundary and there are no retries.

use crate::axe;
use crate::config::Config;
use crate::console::{self, Level};
use crate::heuristics;
use crate::types::{ScanOutcome, ScanTarget};

/// Scans one file. Always returns exactly one outcome.
#[must_use]
pub fn scan_file(config: &Config, target: &ScanTarget) -> ScanOutcome {
    let primary = axe::run_axe(config, target);

    match primary {
        ScanOutcome::Scanned(_) => primary,
        ScanOutcome::Failed { ref error, .. } => {
            console::status(
                &format!(
                    "Browser scan failed for {} ({error}), using fallback checks",
                    target.relative
                ),
                Level::Warn,
            );
            heuristics::run_checks(target)
        }
    }
}
