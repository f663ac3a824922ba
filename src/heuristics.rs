// src/heuristics.rs
//! Fallback scan path: naive string-matching accessibility checks applied
//! when the browser pipeline fails.
//!
//! Four independent checks emit violations in the same shape as axe-core
//! so the renderer never needs to know which path produced a result. The
//! checks are deliberately crude text splits, not DOM analysis; their
//! semantics are preserved from the batch tooling this replaces.

use chrono::Local;

use crate::types::{AxeResults, RuleNode, RuleResult, ScanOutcome, ScanTarget};

const HELP_URL_BASE: &str = "https://dequeuniversity.com/rules/axe/4.7";

/// Runs all heuristic checks against the raw file text. Never panics and
/// never halts the run; a file read error is recorded as a failed outcome,
/// and the worst scan case is an empty violation list.
#[must_use]
pub fn run_checks(target: &ScanTarget) -> ScanOutcome {
    let raw = match std::fs::read(&target.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let name = target
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.relative.clone());
            return ScanOutcome::Failed {
                error: format!("Exception for {name}: {e}"),
                stderr: None,
            };
        }
    };
    let content = String::from_utf8_lossy(&raw);

    let mut violations = Vec::new();
    check_image_alt(&content, &mut violations);
    check_form_labels(&content, &mut violations);
    check_html_lang(&content, &mut violations);
    check_document_title(&content, &mut violations);

    ScanOutcome::Scanned(AxeResults {
        violations,
        passes: Vec::new(),
        incomplete: Vec::new(),
        inapplicable: Vec::new(),
        timestamp: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        url: Some(format!("file://{}", target.path.display())),
    })
}

/// `image-alt`: an `<img` occurrence with no alt attribute before the next
/// `<img`.
fn check_image_alt(content: &str, violations: &mut Vec<RuleResult>) {
    for (i, segment) in content.split("<img").skip(1).enumerate() {
        if !segment.contains(" alt=") && !segment.contains(" alt =") {
            let tag_head = segment.split('>').next().unwrap_or("");
            violations.push(violation(
                "image-alt",
                "critical",
                "Images must have alternate text",
                format!("<img{tag_head}>"),
                format!("img:nth-of-type({})", i + 1),
            ));
        }
    }
}

/// `label`: a form element without an id-plus-for association or an
/// explicit aria-label.
///
/// Known conflation, kept on purpose: "any `for=` anywhere in the
/// document" stands in for "this element has an associated label". Fixing
/// that would silently change report contents against the batch tooling
/// this replaces.
fn check_form_labels(content: &str, violations: &mut Vec<RuleResult>) {
    for element in ["<input", "<select", "<textarea"] {
        if !content.contains(element) {
            continue;
        }
        for (i, segment) in content.split(element).skip(1).enumerate() {
            let labelled = segment.contains(" id=") && content.contains(" for=");
            if !labelled && !segment.contains(" aria-label=") {
                let tag_head = segment.split('>').next().unwrap_or("");
                violations.push(violation(
                    "label",
                    "serious",
                    "Form elements must have labels",
                    format!("{element}{tag_head}>"),
                    format!("{}:nth-of-type({})", &element[1..], i + 1),
                ));
            }
        }
    }
}

/// `html-has-lang`: a document with an `<html` element but no lang
/// attribute anywhere.
fn check_html_lang(content: &str, violations: &mut Vec<RuleResult>) {
    if content.contains("<html") && !content.contains(" lang=") && !content.contains(" lang =") {
        violations.push(violation(
            "html-has-lang",
            "serious",
            "<html> element must have a lang attribute",
            "<html>".to_string(),
            "html".to_string(),
        ));
    }
}

/// `document-title`: no `<title>` element at all.
fn check_document_title(content: &str, violations: &mut Vec<RuleResult>) {
    if !content.contains("<title>") {
        violations.push(violation(
            "document-title",
            "serious",
            "Documents must have a title element",
            "<head>".to_string(),
            "head".to_string(),
        ));
    }
}

fn violation(id: &str, impact: &str, help: &str, html: String, target: String) -> RuleResult {
    RuleResult {
        id: id.to_string(),
        impact: Some(impact.to_string()),
        description: None,
        help: Some(help.to_string()),
        help_url: Some(format!("{HELP_URL_BASE}/{id}")),
        nodes: vec![RuleNode {
            html,
            target: vec![target],
            failure_summary: None,
        }],
    }
}
