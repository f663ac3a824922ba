// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A file selected for scanning: absolute path plus its path relative to
/// the repository root (the key used in reports).
#[derive(Debug, Clone)]
pub struct ScanTarget {
    pub path: PathBuf,
    pub relative: String,
}

/// One offending (or checked) DOM node from an axe rule result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleNode {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(
        rename = "failureSummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub failure_summary: Option<String>,
}

/// A single axe rule outcome (violation, incomplete, pass, or inapplicable).
/// Field names follow the axe-core wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(rename = "helpUrl", default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default)]
    pub nodes: Vec<RuleNode>,
}

/// Structured results for one file, as produced by axe-core or by the
/// fallback heuristics (which emit the same shape).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxeResults {
    #[serde(default)]
    pub violations: Vec<RuleResult>,
    #[serde(default)]
    pub incomplete: Vec<RuleResult>,
    #[serde(default)]
    pub passes: Vec<RuleResult>,
    #[serde(default)]
    pub inapplicable: Vec<RuleResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Terminal result for one file. Serialized untagged so the JSON report
/// carries either the axe shape (`{"violations": ...}`) or the error shape
/// (`{"error": ...}`). `Failed` must stay first: untagged deserialization
/// tries variants in order, and `AxeResults` (all fields defaulted) would
/// otherwise swallow error objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanOutcome {
    Failed {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stderr: Option<String>,
    },
    Scanned(AxeResults),
}

impl ScanOutcome {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ScanOutcome::Failed { .. })
    }

    /// True for a successful scan with zero violations and zero incomplete
    /// entries.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        match self {
            ScanOutcome::Scanned(r) => r.violations.is_empty() && r.incomplete.is_empty(),
            ScanOutcome::Failed { .. } => false,
        }
    }
}

/// Summary counts derived from the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_violations: usize,
    pub total_incomplete: usize,
    pub error_files: usize,
}

/// The full mapping from relative path to outcome, built once per run.
/// `BTreeMap` keeps report iteration lexicographic by relative path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportAggregate {
    #[serde(flatten)]
    pub results: BTreeMap<String, ScanOutcome>,
}

impl ReportAggregate {
    pub fn insert(&mut self, relative: String, outcome: ScanOutcome) {
        self.results.insert(relative, outcome);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total_files: self.results.len(),
            ..Summary::default()
        };
        for outcome in self.results.values() {
            match outcome {
                ScanOutcome::Scanned(r) => {
                    summary.total_violations += r.violations.len();
                    summary.total_incomplete += r.incomplete.len();
                }
                ScanOutcome::Failed { .. } => summary.error_files += 1,
            }
        }
        summary
    }
}
