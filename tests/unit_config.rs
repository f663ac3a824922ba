// tests/unit_config.rs
use std::fs;

use axescan_core::config::{Config, ScanMode};

#[test]
fn test_defaults() {
    let c = Config::new();
    assert_eq!(c.mode, ScanMode::Auto);
    assert_eq!(c.extension, ".html");
    assert_eq!(c.file_limit, 1000);
    assert_eq!(c.scan_timeout_secs, 120);
    assert_eq!(c.diff_timeout_secs, 30);
    assert_eq!(c.node_command, "node");
    assert!(c.exclude_dirs.iter().any(|d| d == "node_modules"));
    assert!(c.exclude_dirs.iter().any(|d| d == "dist"));
    assert!(c.exclude_file_patterns.iter().any(|p| p == "*.spec.ts"));
}

#[test]
fn test_local_toml_overrides() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join("axescan.toml"),
        "scan_timeout_secs = 15\nfile_limit = 5\nexclude_dirs = [\"out\"]\n",
    )
    .unwrap();

    let mut c = Config::new();
    c.repo_path = d.path().to_path_buf();
    c.load_local_config();

    assert_eq!(c.scan_timeout_secs, 15);
    assert_eq!(c.file_limit, 5);
    assert_eq!(c.exclude_dirs, vec!["out".to_string()]);
    // Untouched settings keep their defaults.
    assert_eq!(c.diff_timeout_secs, 30);
}

#[test]
fn test_malformed_toml_is_ignored() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("axescan.toml"), "scan_timeout_secs = [nope").unwrap();

    let mut c = Config::new();
    c.repo_path = d.path().to_path_buf();
    c.load_local_config();

    assert_eq!(c.scan_timeout_secs, 120);
}

#[test]
fn test_missing_toml_is_fine() {
    let d = tempfile::tempdir().unwrap();
    let mut c = Config::new();
    c.repo_path = d.path().to_path_buf();
    c.load_local_config();
    assert_eq!(c.file_limit, 1000);
}

#[test]
fn test_validate_rejects_missing_repo() {
    let mut c = Config::new();
    c.repo_path = "/definitely/not/a/real/path".into();
    assert!(c.validate().is_err());
}
