// tests/unit_report.rs
use std::collections::BTreeMap;
use std::fs;

use axescan_core::report::{self, html};
use axescan_core::types::{AxeResults, ReportAggregate, RuleNode, RuleResult, ScanOutcome};

fn rule(id: &str, snippet: &str) -> RuleResult {
    RuleResult {
        id: id.to_string(),
        impact: Some("serious".to_string()),
        description: None,
        help: Some("help text".to_string()),
        help_url: Some(format!("https://dequeuniversity.com/rules/axe/4.7/{id}")),
        nodes: vec![RuleNode {
            html: snippet.to_string(),
            target: vec!["html".to_string()],
            failure_summary: None,
        }],
    }
}

fn sample_aggregate() -> ReportAggregate {
    let mut agg = ReportAggregate::default();
    agg.insert(
        "a/findings.html".to_string(),
        ScanOutcome::Scanned(AxeResults {
            violations: vec![rule("image-alt", r#"<img src="x.png">"#)],
            incomplete: vec![rule("color-contrast", "<p>dim</p>")],
            passes: vec![rule("document-title", "<title>ok</title>")],
            inapplicable: vec![rule("video-caption", "")],
            timestamp: Some("2026-01-01 00:00:00".to_string()),
            url: Some("file:///a/findings.html".to_string()),
        }),
    );
    agg.insert(
        "clean.html".to_string(),
        ScanOutcome::Scanned(AxeResults::default()),
    );
    agg.insert(
        "broken.html".to_string(),
        ScanOutcome::Failed {
            error: "Timeout after 120 seconds for broken.html".to_string(),
            stderr: Some("stderr tail".to_string()),
        },
    );
    agg
}

#[test]
fn test_json_key_set_matches_scanned_paths() {
    let d = tempfile::tempdir().unwrap();
    let agg = sample_aggregate();
    let path = report::write_json(&agg, d.path()).unwrap();

    let raw = fs::read_to_string(path).unwrap();
    let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&String> = parsed.keys().collect();
    assert_eq!(keys, vec!["a/findings.html", "broken.html", "clean.html"]);
}

#[test]
fn test_json_round_trip_equals_aggregate() {
    let d = tempfile::tempdir().unwrap();
    let agg = sample_aggregate();
    let path = report::write_json(&agg, d.path()).unwrap();

    let raw = fs::read_to_string(path).unwrap();
    let parsed: BTreeMap<String, ScanOutcome> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, agg.results);
}

#[test]
fn test_error_shape_in_json() {
    let agg = sample_aggregate();
    let raw = serde_json::to_string(&agg.results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value["broken.html"]["error"].as_str().unwrap(),
        "Timeout after 120 seconds for broken.html"
    );
    assert!(value["clean.html"]["violations"].as_array().unwrap().is_empty());
}

#[test]
fn test_three_visual_states() {
    let rendered = html::render(&sample_aggregate(), "junovhs/axescan");
    assert_eq!(rendered.section_count, 3);
    assert!(rendered.html.contains("(Error during scan)"));
    assert!(rendered.html.contains("(No violations or incomplete results)"));
    assert!(rendered.html.contains("(1 violations, 1 incomplete)"));
}

#[test]
fn test_sections_are_ordered_and_collapsed() {
    let rendered = html::render(&sample_aggregate(), "repo");
    let a = rendered.html.find("a/findings.html").unwrap();
    let b = rendered.html.find("broken.html").unwrap();
    let c = rendered.html.find("clean.html").unwrap();
    assert!(a < b && b < c);
    // Initial state collapsed: every section body carries the hidden class.
    assert!(rendered.html.contains(r#"<div id="a_findings_html" class="hidden">"#));
}

#[test]
fn test_free_text_is_escaped() {
    let mut agg = ReportAggregate::default();
    agg.insert(
        "evil.html".to_string(),
        ScanOutcome::Failed {
            error: "<script>alert(1)</script>".to_string(),
            stderr: None,
        },
    );
    let rendered = html::render(&agg, "<repo>");
    assert!(!rendered.html.contains("<script>alert(1)</script>"));
    assert!(rendered.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(rendered.html.contains("&lt;repo&gt;"));
}

#[test]
fn test_title_marker_in_snippet_cannot_close_head() {
    let mut agg = ReportAggregate::default();
    agg.insert(
        "t.html".to_string(),
        ScanOutcome::Scanned(AxeResults {
            violations: vec![rule("document-title", "<title>sneaky</title>")],
            ..AxeResults::default()
        }),
    );
    let rendered = html::render(&agg, "repo");
    // Exactly one literal closing title tag: the report's own head.
    assert_eq!(rendered.html.matches("</title>").count(), 1);
}

#[test]
fn test_coverage_panel_deduplicates_ids() {
    let mut agg = sample_aggregate();
    agg.insert(
        "b/more.html".to_string(),
        ScanOutcome::Scanned(AxeResults {
            violations: vec![rule("image-alt", "<img>")],
            ..AxeResults::default()
        }),
    );
    let rendered = html::render(&agg, "repo");
    // image-alt appears in two files but is listed once in the panel.
    assert_eq!(
        rendered.html.matches("<li><strong>image-alt</strong></li>").count(),
        1
    );
    assert!(rendered.html.contains("Total Testing Coverage"));
}

#[test]
fn test_empty_run_shows_no_files_panel() {
    let agg = ReportAggregate::default();
    assert_eq!(agg.summary().total_files, 0);

    let rendered = html::render(&agg, "empty/repo");
    assert_eq!(rendered.section_count, 0);
    assert!(rendered.html.contains("No Tests Executed"));
    assert!(rendered.html.contains("empty/repo"));
    assert!(!rendered.html.contains("Total Testing Coverage"));
}

#[test]
fn test_pagination_script_is_embedded() {
    let rendered = html::render(&sample_aggregate(), "repo");
    assert!(rendered.html.contains("const filesPerPage = 10;"));
    assert!(rendered.html.contains("function prevPage()"));
    assert!(rendered.html.contains("function nextPage()"));
    assert!(rendered.html.contains("function toggleSection(id)"));
}

#[test]
fn test_write_reports_creates_both_artifacts() {
    let d = tempfile::tempdir().unwrap();
    let out = d.path().join("nested").join("reports");
    let (json_path, html_path) =
        report::write_reports(&sample_aggregate(), "repo", &out).unwrap();
    assert!(json_path.exists());
    assert!(html_path.exists());
    assert!(fs::read_to_string(html_path).unwrap().starts_with("<!DOCTYPE html>"));
}
