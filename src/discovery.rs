// src/discovery.rs
//! File Locator: walks the repository for scannable files, applies the
//! exclusion rules, and optionally narrows to files changed against the
//! base branch.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use walkdir::WalkDir;

use crate::config::{Config, ScanMode};
use crate::console::{self, Level};
use crate::git;
use crate::types::ScanTarget;

/// Mode after CLI override and CI-context inference have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveMode {
    Full,
    Changed,
}

/// Runs the file discovery pipeline. Infallible: walk errors and git
/// failures narrow or widen the candidate set but never abort the run.
#[must_use]
pub fn locate(config: &Config) -> Vec<ScanTarget> {
    let mut targets = match resolve_mode(config) {
        EffectiveMode::Full => full_scan(config),
        EffectiveMode::Changed => changed_scan(config),
    };
    if targets.len() > config.file_limit {
        console::status(
            &format!(
                "Capping scan at {} files ({} matched)",
                config.file_limit,
                targets.len()
            ),
            Level::Warn,
        );
        targets.truncate(config.file_limit);
    }
    targets
}

/// Resolves the scan mode: explicit CLI choice wins, otherwise CI-context
/// environment variables decide. Pull requests scan only affected files;
/// pushes to a trunk branch and everything else scan the full tree.
#[must_use]
pub fn resolve_mode(config: &Config) -> EffectiveMode {
    match config.mode {
        ScanMode::All => return EffectiveMode::Full,
        ScanMode::Affected => return EffectiveMode::Changed,
        ScanMode::Auto => {}
    }

    let event = env::var("GITHUB_EVENT_NAME").unwrap_or_default();
    let base = env::var("GITHUB_BASE_REF").unwrap_or_default();

    if event == "pull_request" {
        console::status("Pull request detected - scanning only affected files", Level::Info);
        EffectiveMode::Changed
    } else if event == "push" && (base == "main" || base == "master") {
        console::status("Direct push to trunk detected - scanning entire repository", Level::Info);
        EffectiveMode::Full
    } else {
        EffectiveMode::Full
    }
}

fn full_scan(config: &Config) -> Vec<ScanTarget> {
    console::status(
        &format!("Searching for *{} files...", config.extension),
        Level::Info,
    );

    let exclusions = Exclusions::from_config(config);
    let walker = WalkDir::new(&config.repo_path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && exclusions.is_excluded_dir(&e.file_name().to_string_lossy()))
        });

    let mut targets = Vec::new();
    let mut errors = 0usize;
    for item in walker {
        let entry = match item {
            Ok(e) => e,
            Err(_) => {
                errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(target) = to_target(entry.path(), config, &exclusions) {
            targets.push(target);
        }
    }

    if errors > 0 && config.verbose {
        console::status(
            &format!("Encountered {errors} errors during file walk"),
            Level::Warn,
        );
    }
    console::status(
        &format!("Found {} *{} files.", targets.len(), config.extension),
        Level::Success,
    );
    targets
}

/// Intersects the candidate set with the git diff against the base branch.
/// Any diff failure degrades to a full scan.
fn changed_scan(config: &Config) -> Vec<ScanTarget> {
    let base_ref = env::var("GITHUB_BASE_REF").unwrap_or_else(|_| "main".to_string());
    let timeout = Duration::from_secs(config.diff_timeout_secs);

    let changed = match git::changed_files(&config.repo_path, &base_ref, timeout) {
        Ok(paths) => paths,
        Err(e) => {
            console::status(
                &format!("Change detection failed ({e}), falling back to full scan"),
                Level::Warn,
            );
            return full_scan(config);
        }
    };

    console::status(
        &format!("Git diff found {} changed files", changed.len()),
        Level::Info,
    );

    let exclusions = Exclusions::from_config(config);
    let targets: Vec<ScanTarget> = changed
        .iter()
        .filter_map(|rel| {
            let full = config.repo_path.join(rel);
            if !full.exists() {
                return None;
            }
            to_target(&full, config, &exclusions)
        })
        .collect();

    console::status(
        &format!("Found {} changed *{} files.", targets.len(), config.extension),
        Level::Success,
    );
    targets
}

/// Applies extension and exclusion rules; builds the relative-path key.
fn to_target(path: &Path, config: &Config, exclusions: &Exclusions) -> Option<ScanTarget> {
    let filename = path.file_name()?.to_string_lossy();
    if !filename
        .to_lowercase()
        .ends_with(&config.extension.to_lowercase())
    {
        return None;
    }

    let relative = path
        .strip_prefix(&config.repo_path)
        .unwrap_or(path)
        .to_path_buf();
    if exclusions.is_excluded(&relative, &filename) {
        return None;
    }

    Some(ScanTarget {
        path: path.to_path_buf(),
        relative: normalize_path(&relative),
    })
}

/// Normalizes a path to use forward slashes (stable report keys).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Compiled exclusion rules: directory names matched against every path
/// segment, filename globs matched against the basename.
struct Exclusions {
    dirs: Vec<String>,
    patterns: Vec<Regex>,
}

impl Exclusions {
    fn from_config(config: &Config) -> Self {
        Self {
            dirs: config.exclude_dirs.clone(),
            patterns: config
                .exclude_file_patterns
                .iter()
                .filter_map(|p| Regex::new(&glob_to_regex(p)).ok())
                .collect(),
        }
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.iter().any(|d| d == name)
    }

    fn is_excluded(&self, relative: &Path, filename: &str) -> bool {
        if self.patterns.iter().any(|re| re.is_match(filename)) {
            return true;
        }
        relative
            .components()
            .any(|c| self.is_excluded_dir(&c.as_os_str().to_string_lossy()))
    }
}

/// Converts a filename glob (`*.d.ts`) into an anchored regex.
fn glob_to_regex(pattern: &str) -> String {
    let mut re = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    re
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_to_regex_escapes_dots() {
        let re = Regex::new(&glob_to_regex("*.d.ts")).unwrap();
        assert!(re.is_match("types.d.ts"));
        assert!(!re.is_match("types_d_ts"));
        assert!(!re.is_match("typesxdxts"));
    }

    #[test]
    fn test_exclusion_matches_any_depth_segment() {
        let ex = Exclusions {
            dirs: vec!["dist".to_string()],
            patterns: vec![],
        };
        assert!(ex.is_excluded(Path::new("a/dist/b/index.html"), "index.html"));
        assert!(ex.is_excluded(Path::new("dist/index.html"), "index.html"));
        assert!(!ex.is_excluded(Path::new("a/distro/index.html"), "index.html"));
    }
}
