// src/report/html.rs
//! Renders the self-contained, paginated HTML report.
//!
//! One collapsible section per scanned file, in one of three visual
//! states: error (scan failed), clean (nothing found), or findings.
//! Free text goes through `escape::escape` at every interpolation site;
//! markup snippets additionally go through `escape::neutralize_title`.

use std::collections::BTreeSet;
use std::fmt::Write;

use chrono::Local;

use super::escape::{escape, neutralize_title};
use crate::types::{ReportAggregate, RuleResult, ScanOutcome};

/// A rendered document plus the section count used by the post-write
/// sanity check.
#[derive(Debug)]
pub struct RenderedReport {
    pub html: String,
    pub section_count: usize,
}

const STYLE: &str = r"
body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.header { background: #2c3e50; color: white; padding: 20px; border-radius: 5px; margin-bottom: 30px; }
.summary-card { background: #ecf0f1; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
.violation { background: #ffe6e6; border-left: 4px solid #e74c3c; padding: 15px; margin: 10px 0; border-radius: 3px; }
.incomplete { background: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; margin: 10px 0; border-radius: 3px; }
.success { background: #d4edda; border-left: 4px solid #28a745; padding: 15px; margin: 10px 0; border-radius: 3px; }
.file-section { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
.toggle { cursor: pointer; color: #3498db; }
.hidden { display: none; }
.impact-critical { border-left-color: #e74c3c !important; }
.impact-serious { border-left-color: #e67e22 !important; }
.impact-moderate { border-left-color: #f39c12 !important; }
.impact-minor { border-left-color: #f1c40f !important; }
.error { background: #f8d7da; border-left: 4px solid #dc3545; padding: 15px; margin: 10px 0; border-radius: 3px; }
.code-snippet { background: #f1f1f1; padding: 10px; border-radius: 3px; font-family: monospace; overflow-x: auto; white-space: pre-wrap; }
.no-files { background: #fff3cd; padding: 15px; border-radius: 5px; border-left: 4px solid #ffc107; }
.coverage-totals { background: #f8f9fa; padding: 15px; border-radius: 5px; margin-top: 20px; }
.pagination { margin: 20px 0; text-align: center; }
.pagination button { padding: 10px 20px; margin: 0 5px; cursor: pointer; }
.pagination button:disabled { cursor: not-allowed; opacity: 0.5; }
";

/// Client-side pagination over file sections plus the section toggler.
/// Static boilerplate, ten sections per page.
const SCRIPT: &str = r"
try {
    const resultsDiv = document.getElementById('results');
    const fileSections = Array.from(resultsDiv.getElementsByClassName('file-section'));
    const filesPerPage = 10;
    let currentPage = 0;

    function showPage(page) {
        fileSections.forEach((section, index) => {
            section.style.display = (index >= page * filesPerPage && index < (page + 1) * filesPerPage) ? 'block' : 'none';
        });
        document.getElementById('pageInfo').textContent = `Page ${page + 1} of ${Math.ceil(fileSections.length / filesPerPage)}`;
        document.getElementById('prevBtn').disabled = page === 0;
        document.getElementById('nextBtn').disabled = page === Math.ceil(fileSections.length / filesPerPage) - 1;
    }

    function prevPage() {
        if (currentPage > 0) {
            currentPage--;
            showPage(currentPage);
        }
    }

    function nextPage() {
        if (currentPage < Math.ceil(fileSections.length / filesPerPage) - 1) {
            currentPage++;
            showPage(currentPage);
        }
    }

    function toggleSection(id) {
        const element = document.getElementById(id);
        element.classList.toggle('hidden');
    }

    showPage(0);
} catch (e) {
    console.error(e);
}
";

/// Renders the full document.
#[must_use]
pub fn render(aggregate: &ReportAggregate, repo_name: &str) -> RenderedReport {
    let summary = aggregate.summary();
    let sections: Vec<String> = aggregate
        .results
        .iter()
        .map(|(path, outcome)| render_section(path, outcome))
        .collect();

    let coverage = coverage_panel(aggregate, repo_name);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>WCAG Accessibility Report</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>WCAG Accessibility Report</h1>
            <p>Generated on {timestamp}</p>
        </div>

        <div class="summary-card">
            <h2>Summary</h2>
            <p><strong>Total files scanned:</strong> {total_files}</p>
            <p><strong>Total violations found:</strong> {total_violations}</p>
            <p><strong>Total incomplete results:</strong> {total_incomplete}</p>
            <p><strong>Files with errors:</strong> {error_files}</p>
            <p><strong>Repository:</strong> {repo}</p>
        </div>

        <div class="summary-card">
            <h2 class="toggle" onclick="toggleSection('tests-executed')">
                Tests Executed <small>(Click to expand)</small>
            </h2>
            <div id="tests-executed" class="hidden">
{coverage}
            </div>
        </div>

        <div class="pagination">
            <button onclick="prevPage()" id="prevBtn">Previous</button>
            <span id="pageInfo"></span>
            <button onclick="nextPage()" id="nextBtn">Next</button>
        </div>

        <h2>Detailed Results</h2>
        <div id="results">{results}</div>
    </div>

    <script>{SCRIPT}</script>
</body>
</html>
"#,
        timestamp = Local::now().format("%Y-%m-%d %H:%M:%S"),
        total_files = summary.total_files,
        total_violations = summary.total_violations,
        total_incomplete = summary.total_incomplete,
        error_files = summary.error_files,
        repo = escape(repo_name),
        results = if sections.is_empty() {
            r#"<div class="success">No accessibility issues found!</div>"#.to_string()
        } else {
            sections.join("\n")
        },
    );

    RenderedReport {
        html,
        section_count: sections.len(),
    }
}

fn render_section(path: &str, outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Failed { error, stderr } => error_section(path, error, stderr.as_deref()),
        ScanOutcome::Scanned(results) => {
            if outcome.is_clean() {
                clean_section(path)
            } else {
                findings_section(path, &results.violations, &results.incomplete)
            }
        }
    }
}

/// DOM id derived from the relative path, matching the toggle targets.
fn file_id(path: &str) -> String {
    path.replace(['/', '.', ' '], "_")
}

fn error_section(path: &str, error: &str, stderr: Option<&str>) -> String {
    let id = file_id(path);
    let details = stderr
        .filter(|s| !s.is_empty())
        .map(|s| format!("<p><strong>Details:</strong> {}</p>", escape(s)))
        .unwrap_or_default();
    format!(
        r#"<div class="file-section">
    <h3 class="toggle" onclick="toggleSection('{id}')">
        ✖ {path} <small>(Error during scan)</small>
    </h3>
    <div id="{id}" class="hidden">
        <div class="error">
            <p><strong>Error:</strong> {error}</p>
            {details}
        </div>
    </div>
</div>"#,
        id = id,
        path = escape(path),
        error = escape(error),
        details = details,
    )
}

fn clean_section(path: &str) -> String {
    let id = file_id(path);
    format!(
        r#"<div class="file-section">
    <h3 class="toggle" onclick="toggleSection('{id}')">
        ✔ {path} <small>(No violations or incomplete results)</small>
    </h3>
    <div id="{id}" class="hidden success">
        <p>No accessibility issues found in this file.</p>
    </div>
</div>"#,
        id = id,
        path = escape(path),
    )
}

fn findings_section(path: &str, violations: &[RuleResult], incomplete: &[RuleResult]) -> String {
    let id = file_id(path);
    let mut body = String::new();
    for (i, rule) in violations.iter().enumerate() {
        body.push_str(&rule_card("violation", "Violation", i, rule));
    }
    for (i, rule) in incomplete.iter().enumerate() {
        body.push_str(&rule_card("incomplete", "Incomplete", i, rule));
    }
    format!(
        r#"<div class="file-section">
    <h3 class="toggle" onclick="toggleSection('{id}')">
        ▸ {path} <small>({v} violations, {inc} incomplete)</small>
    </h3>
    <div id="{id}" class="hidden">
{body}    </div>
</div>"#,
        id = id,
        path = escape(path),
        v = violations.len(),
        inc = incomplete.len(),
        body = body,
    )
}

fn rule_card(css_class: &str, label: &str, index: usize, rule: &RuleResult) -> String {
    let impact = rule.impact.as_deref().unwrap_or("unknown");
    let help = rule.help.as_deref().unwrap_or("No description");
    let help_url = rule.help_url.as_deref().unwrap_or("#");
    let node = rule.nodes.first();
    let snippet = node.map(|n| n.html.as_str()).unwrap_or("");
    let failure = node.and_then(|n| n.failure_summary.as_deref()).unwrap_or("");

    let mut card = String::new();
    let _ = write!(
        card,
        r#"<div class="{css_class} impact-{impact_class}">
    <h4>{label} #{num}: {rule_id} <small>(Impact: {impact_text})</small></h4>
    <p><strong>Description:</strong> {help}</p>
    <p><strong>Help:</strong> <a href="{url}" target="_blank">{url}</a></p>
"#,
        impact_class = escape(impact),
        num = index + 1,
        rule_id = escape(&rule.id),
        impact_text = escape(impact),
        help = escape(help),
        url = escape(help_url),
    );
    if !snippet.is_empty() {
        let _ = writeln!(
            card,
            "    <div class=\"code-snippet\"><strong>Code:</strong> {}</div>",
            escape(&neutralize_title(snippet))
        );
    }
    if !failure.is_empty() {
        let _ = writeln!(
            card,
            "    <p><strong>Failure Summary:</strong> {}</p>",
            escape(&neutralize_title(failure))
        );
    }
    card.push_str("</div>\n");
    card
}

/// Deduplicated test-id coverage across all files, or the "no files"
/// explainer when nothing was located at all.
fn coverage_panel(aggregate: &ReportAggregate, repo_name: &str) -> String {
    let mut issues: BTreeSet<&str> = BTreeSet::new();
    let mut passed: BTreeSet<&str> = BTreeSet::new();
    let mut inapplicable: BTreeSet<&str> = BTreeSet::new();

    for outcome in aggregate.results.values() {
        if let ScanOutcome::Scanned(r) = outcome {
            issues.extend(r.violations.iter().map(|v| v.id.as_str()));
            issues.extend(r.incomplete.iter().map(|v| v.id.as_str()));
            passed.extend(r.passes.iter().map(|v| v.id.as_str()));
            inapplicable.extend(r.inapplicable.iter().map(|v| v.id.as_str()));
        }
    }

    if issues.is_empty() && passed.is_empty() && inapplicable.is_empty() {
        if aggregate.is_empty() {
            return no_files_panel(repo_name);
        }
        return "<p><em>No tests were executed (possibly due to errors or empty results)</em></p>"
            .to_string();
    }

    let mut all_ids: BTreeSet<&str> = BTreeSet::new();
    all_ids.extend(issues.iter().copied());
    all_ids.extend(passed.iter().copied());
    all_ids.extend(inapplicable.iter().copied());
    let unique_total = all_ids.len();

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div>
    <h4>Tests with Issues Found:</h4>
    {issues}
</div>
<div>
    <h4>Tests That Passed:</h4>
    {passed}
</div>
<div>
    <h4>Tests Not Applicable:</h4>
    {inapplicable}
</div>
<div class="coverage-totals">
    <p><strong>Total Testing Coverage:</strong></p>
    <ul>
        <li><strong>Total unique tests run:</strong> {unique_total}</li>
        <li><strong>Tests with issues:</strong> {n_issues}</li>
        <li><strong>Tests passed:</strong> {n_passed}</li>
        <li><strong>Tests not applicable:</strong> {n_inapplicable}</li>
    </ul>
</div>
<p><em>Note: these are the test IDs that were exercised during the scan. Each ID is a specific WCAG accessibility rule.</em></p>"#,
        issues = id_list(&issues, "No violations or incomplete results found!"),
        passed = id_list(&passed, "No tests passed (possibly due to errors or limited content)"),
        inapplicable = id_list(&inapplicable, "All tests were applicable to your content"),
        unique_total = unique_total,
        n_issues = issues.len(),
        n_passed = passed.len(),
        n_inapplicable = inapplicable.len(),
    );
    out
}

fn id_list(ids: &BTreeSet<&str>, empty_note: &str) -> String {
    if ids.is_empty() {
        return format!("<p><em>{empty_note}</em></p>");
    }
    let items: String = ids
        .iter()
        .map(|id| format!("<li><strong>{}</strong></li>", escape(id)))
        .collect();
    format!("<p><strong>Total:</strong> {}</p><ul>{items}</ul>", ids.len())
}

fn no_files_panel(repo_name: &str) -> String {
    format!(
        r#"<div class="no-files">
    <h4>No Tests Executed</h4>
    <p><strong>Reason:</strong> No HTML files were found in the repository <strong>{repo}</strong>.</p>
    <p><strong>What this means:</strong></p>
    <ul>
        <li>This repository doesn't contain any <code>.html</code> files</li>
        <li>HTML files might be in excluded directories (like <code>dist</code>, <code>build</code>, etc.)</li>
        <li>HTML files might have different extensions (like <code>.htm</code>)</li>
    </ul>
    <p><strong>To run accessibility tests:</strong></p>
    <ul>
        <li>Ensure your repository contains <code>.html</code> files</li>
        <li>Check that HTML files are not in excluded directories</li>
        <li>Consider adding HTML files to test accessibility compliance</li>
    </ul>
</div>"#,
        repo = escape(repo_name),
    )
}
