// tests/unit_discovery.rs
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use axescan_core::config::{Config, ScanMode};
use axescan_core::discovery::{self, EffectiveMode};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(root: &Path) -> Config {
    let mut c = Config::new();
    c.repo_path = root.to_path_buf();
    c.mode = ScanMode::All;
    c
}

fn relative_set(config: &Config) -> BTreeSet<String> {
    discovery::locate(config)
        .into_iter()
        .map(|t| t.relative)
        .collect()
}

#[test]
fn test_finds_html_recursively() {
    let d = tempfile::tempdir().unwrap();
    write(d.path(), "index.html", "<html></html>");
    write(d.path(), "docs/page.html", "<html></html>");
    write(d.path(), "notes.txt", "not html");

    let found = relative_set(&config_for(d.path()));
    let expected: BTreeSet<String> = ["index.html", "docs/page.html"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_excluded_dir_is_pruned_at_any_depth() {
    let d = tempfile::tempdir().unwrap();
    write(d.path(), "keep.html", "<html></html>");
    write(d.path(), "dist/skip.html", "<html></html>");
    write(d.path(), "a/b/dist/c/skip.html", "<html></html>");
    write(d.path(), "distro/keep2.html", "<html></html>");

    let found = relative_set(&config_for(d.path()));
    let expected: BTreeSet<String> = ["keep.html", "distro/keep2.html"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_filename_pattern_exclusion() {
    let d = tempfile::tempdir().unwrap();
    write(d.path(), "keep.html", "<html></html>");
    write(d.path(), "bundle.min.html", "<html></html>");

    let mut c = config_for(d.path());
    c.exclude_file_patterns.push("*.min.html".to_string());

    let found = relative_set(&c);
    assert!(found.contains("keep.html"));
    assert!(!found.contains("bundle.min.html"));
}

#[test]
fn test_empty_repository_yields_nothing() {
    let d = tempfile::tempdir().unwrap();
    assert!(relative_set(&config_for(d.path())).is_empty());
}

#[test]
fn test_file_limit_caps_result() {
    let d = tempfile::tempdir().unwrap();
    for i in 0..5 {
        write(d.path(), &format!("page{i}.html"), "<html></html>");
    }
    let mut c = config_for(d.path());
    c.file_limit = 3;
    assert_eq!(discovery::locate(&c).len(), 3);
}

#[test]
fn test_explicit_mode_overrides_inference() {
    let mut c = Config::new();
    c.mode = ScanMode::All;
    assert_eq!(discovery::resolve_mode(&c), EffectiveMode::Full);
    c.mode = ScanMode::Affected;
    assert_eq!(discovery::resolve_mode(&c), EffectiveMode::Changed);
}

#[test]
fn test_affected_mode_degrades_to_full_outside_git() {
    // A tempdir is not a git repository, so the diff fails and the locator
    // must silently widen to a full scan.
    let d = tempfile::tempdir().unwrap();
    write(d.path(), "index.html", "<html></html>");

    let mut c = config_for(d.path());
    c.mode = ScanMode::Affected;
    c.diff_timeout_secs = 10;

    let found = relative_set(&c);
    assert!(found.contains("index.html"));
}
