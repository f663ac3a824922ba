// src/config.rs
//! Run configuration, built once at startup and passed to each component.

use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::console::{self, Level};

/// How the file locator chooses its candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    /// Infer from CI context (pull request -> affected, otherwise all).
    Auto,
    /// Walk the entire repository tree.
    All,
    /// Only files changed against the base branch.
    Affected,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub repo_path: PathBuf,
    pub output_dir: PathBuf,
    pub mode: ScanMode,
    /// Directory names excluded at any depth.
    pub exclude_dirs: Vec<String>,
    /// Filename glob patterns excluded everywhere.
    pub exclude_file_patterns: Vec<String>,
    /// File extension the locator matches on.
    pub extension: String,
    /// Hard cap on the number of files scanned per run.
    pub file_limit: usize,
    /// Per-file timeout for the browser-automation subprocess.
    pub scan_timeout_secs: u64,
    /// Timeout for the git diff used by affected-only mode.
    pub diff_timeout_secs: u64,
    /// Executable used to run the generated automation script.
    pub node_command: String,
    pub verbose: bool,
}

pub const EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "www",
    ".git",
    "coverage",
    ".angular",
    "ios",
    "android",
    "platforms",
    "Pods",
    "DerivedData",
    ".idea",
    ".vscode",
];

pub const EXCLUDE_FILE_PATTERNS: &[&str] =
    &["*.d.ts", "*.spec.ts", "*.test.ts", "*.mock.ts", "*.data.ts"];

impl Config {
    /// Creates a config with defaults. The repository root comes from
    /// `GITHUB_WORKSPACE` when set, otherwise the current directory.
    #[must_use]
    pub fn new() -> Self {
        let repo_path = env::var("GITHUB_WORKSPACE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            repo_path,
            output_dir: PathBuf::from("./reports"),
            mode: ScanMode::Auto,
            exclude_dirs: EXCLUDE_DIRS.iter().map(ToString::to_string).collect(),
            exclude_file_patterns: EXCLUDE_FILE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            extension: ".html".to_string(),
            file_limit: 1000,
            scan_timeout_secs: 120,
            diff_timeout_secs: 30,
            node_command: "node".to_string(),
            verbose: false,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the repository path does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.repo_path.exists() {
            anyhow::bail!(
                "repository path does not exist: {}",
                self.repo_path.display()
            );
        }
        Ok(())
    }

    /// Applies overrides from an optional `axescan.toml` in the repository
    /// root. A missing file is normal; a malformed one is reported and
    /// ignored.
    pub fn load_local_config(&mut self) {
        let path = self.repo_path.join("axescan.toml");
        let Ok(raw) = fs::read_to_string(&path) else {
            return;
        };
        match toml::from_str::<LocalConfig>(&raw) {
            Ok(local) => self.apply(local),
            Err(e) => console::status(
                &format!("Ignoring malformed {}: {e}", path.display()),
                Level::Warn,
            ),
        }
    }

    fn apply(&mut self, local: LocalConfig) {
        if let Some(dirs) = local.exclude_dirs {
            self.exclude_dirs = dirs;
        }
        if let Some(patterns) = local.exclude_file_patterns {
            self.exclude_file_patterns = patterns;
        }
        if let Some(limit) = local.file_limit {
            self.file_limit = limit;
        }
        if let Some(secs) = local.scan_timeout_secs {
            self.scan_timeout_secs = secs;
        }
        if let Some(secs) = local.diff_timeout_secs {
            self.diff_timeout_secs = secs;
        }
        if let Some(cmd) = local.node_command {
            self.node_command = cmd;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Subset of settings overridable from `axescan.toml`.
#[derive(Debug, Default, Deserialize)]
struct LocalConfig {
    exclude_dirs: Option<Vec<String>>,
    exclude_file_patterns: Option<Vec<String>>,
    file_limit: Option<usize>,
    scan_timeout_secs: Option<u64>,
    diff_timeout_secs: Option<u64>,
    node_command: Option<String>,
}
