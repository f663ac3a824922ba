// src/axe.rs
//! Primary scan path: drives axe-core inside a headless browser via a
//! generated Node.js script.
//!
//! Every failure mode (spawn error, timeout, non-zero exit, empty or
//! malformed stdout) maps to `ScanOutcome::Failed` so the dispatcher can
//! run the heuristic fallback; nothing here propagates past the boundary.

use std::io::Write;
use std::time::Duration;

use serde_json::Value;
use tempfile::Builder;

use crate::config::Config;
use crate::console::{self, Level};
use crate::error::ScanError;
use crate::process::{self, run_with_timeout, ProcessOutput};
use crate::types::{ScanOutcome, ScanTarget};

const EXCERPT_LEN: usize = 200;

/// Node script template. `__TARGET__` is replaced with the JSON-quoted
/// absolute path of the file under scan.
const AXE_SCRIPT: &str = r#"
const fs = require('fs');
const puppeteer = require('puppeteer');

async function runAxe() {
    const browser = await puppeteer.launch({
        headless: 'new',
        executablePath: process.env.PUPPETEER_EXECUTABLE_PATH || undefined,
        args: ['--no-sandbox', '--disable-setuid-sandbox', '--disable-web-security']
    });
    const page = await browser.newPage();

    try {
        await page.setDefaultNavigationTimeout(60000);
        const htmlContent = fs.readFileSync(__TARGET__, 'utf8');
        await page.setContent(htmlContent, {
            waitUntil: 'networkidle0',
            timeout: 60000
        });

        const axeCorePath = require.resolve('axe-core');
        const axeScript = fs.readFileSync(axeCorePath, 'utf8');
        await page.evaluate(axeScript);

        const results = await page.evaluate(async () => {
            return await axe.run();
        });
        console.log(JSON.stringify(results));
        await browser.close();
        process.exit(0);
    } catch (error) {
        console.error(JSON.stringify({ error: error.message, stack: error.stack }));
        await browser.close();
        process.exit(1);
    }
}

runAxe().catch(error => {
    console.error(JSON.stringify({ error: error.message, stack: error.stack }));
    process.exit(1);
});
"#;

/// Runs the browser-automation scan for one file.
#[must_use]
pub fn run_axe(config: &Config, target: &ScanTarget) -> ScanOutcome {
    let name = file_name(target);

    let absolute = match target.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            return ScanOutcome::Failed {
                error: format!("Cannot resolve path for {name}: {e}"),
                stderr: None,
            }
        }
    };

    // Quote via JSON so arbitrary path characters cannot break the script.
    let quoted = match serde_json::to_string(&absolute.to_string_lossy()) {
        Ok(q) => q,
        Err(e) => {
            return ScanOutcome::Failed {
                error: format!("Cannot encode path for {name}: {e}"),
                stderr: None,
            }
        }
    };
    let script = AXE_SCRIPT.replace("__TARGET__", &quoted);

    // The script lives next to the repo's node_modules so `require` can
    // resolve puppeteer and axe-core. Dropped (deleted) when this scope ends.
    let script_file = match write_script(config, &script) {
        Ok(f) => f,
        Err(e) => {
            return ScanOutcome::Failed {
                error: format!("Cannot write automation script for {name}: {e}"),
                stderr: None,
            }
        }
    };

    let args = vec![script_file.path().to_string_lossy().into_owned()];
    let timeout = Duration::from_secs(config.scan_timeout_secs);
    let output = match run_with_timeout(&config.node_command, &args, &config.repo_path, timeout) {
        Ok(o) => o,
        Err(ScanError::Timeout { seconds, .. }) => {
            return ScanOutcome::Failed {
                error: format!("Timeout after {seconds} seconds for {name}"),
                stderr: None,
            }
        }
        Err(e) => {
            return ScanOutcome::Failed {
                error: format!("Automation subprocess error for {name}: {e}"),
                stderr: None,
            }
        }
    };

    if config.verbose {
        console::status(
            &format!("Automation exit code for {name}: {:?}", output.code),
            Level::Info,
        );
        console::status(
            &format!("Automation STDOUT: {}", process::excerpt(&output.stdout, EXCERPT_LEN)),
            Level::Info,
        );
        console::status(
            &format!("Automation STDERR: {}", process::excerpt(&output.stderr, EXCERPT_LEN)),
            Level::Info,
        );
    }

    parse_output(&output, &name)
}

fn write_script(config: &Config, script: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = Builder::new()
        .prefix(".axescan-")
        .suffix(".js")
        .tempfile_in(&config.repo_path)?;
    file.write_all(script.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn parse_output(output: &ProcessOutput, name: &str) -> ScanOutcome {
    if output.success() && !output.stdout.trim().is_empty() {
        return match serde_json::from_str(output.stdout.trim()) {
            Ok(results) => ScanOutcome::Scanned(results),
            Err(_) => ScanOutcome::Failed {
                error: format!(
                    "Invalid JSON output for {name}: {}",
                    process::excerpt(&output.stdout, EXCERPT_LEN)
                ),
                stderr: None,
            },
        };
    }

    let diagnostic = if output.stderr.trim().is_empty() {
        &output.stdout
    } else {
        &output.stderr
    };

    // The script reports its own failures as {"error": ..., "stack": ...};
    // surface that message when present, otherwise the raw diagnostic.
    let error = match serde_json::from_str::<Value>(diagnostic.trim()) {
        Ok(Value::Object(map)) => map
            .get("error")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_else(|| process::excerpt(diagnostic, EXCERPT_LEN)),
        _ => format!(
            "Automation error for {name}: {}",
            process::excerpt(diagnostic, EXCERPT_LEN)
        ),
    };

    ScanOutcome::Failed {
        error,
        stderr: Some(process::excerpt(&output.stderr, EXCERPT_LEN)),
    }
}

fn file_name(target: &ScanTarget) -> String {
    target
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.relative.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: Option<i32>, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_valid_json_becomes_scanned() {
        let out = output(Some(0), r#"{"violations":[],"passes":[],"incomplete":[],"inapplicable":[]}"#, "");
        assert!(matches!(parse_output(&out, "a.html"), ScanOutcome::Scanned(_)));
    }

    #[test]
    fn test_garbage_stdout_becomes_failed() {
        let out = output(Some(0), "not json at all", "");
        let result = parse_output(&out, "a.html");
        assert!(result.is_error());
    }

    #[test]
    fn test_script_error_object_message_is_surfaced() {
        let out = output(Some(1), "", r#"{"error":"net::ERR_FAILED","stack":"..."}"#);
        match parse_output(&out, "a.html") {
            ScanOutcome::Failed { error, .. } => assert_eq!(error, "net::ERR_FAILED"),
            ScanOutcome::Scanned(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_empty_stdout_with_zero_exit_is_failure() {
        let out = output(Some(0), "", "");
        assert!(parse_output(&out, "a.html").is_error());
    }
}
