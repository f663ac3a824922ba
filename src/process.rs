// src/process.rs
//! Bounded external command execution.
//!
//! Commands run with stdout/stderr captured to unnamed temp files rather
//! than pipes, so a chatty child cannot deadlock on a full pipe buffer
//! while we poll for completion.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, ScanError};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Captured result of a completed command.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs `program` with `args` in `cwd`, killing it after `timeout`.
///
/// # Errors
/// Returns `ScanError::Spawn` if the program cannot start,
/// `ScanError::Timeout` if it outlives the deadline, and
/// `ScanError::Wait`/`ScanError::Io` for bookkeeping failures.
/// A non-zero exit is NOT an error here; callers inspect `code`.
pub fn run_with_timeout(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Duration,
) -> Result<ProcessOutput> {
    let mut stdout_file = tempfile::tempfile()?;
    let mut stderr_file = tempfile::tempfile()?;

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file.try_clone()?))
        .stderr(Stdio::from(stderr_file.try_clone()?))
        .spawn()
        .map_err(|source| ScanError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if started.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ScanError::Timeout {
                        program: program.to_string(),
                        seconds: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                return Err(ScanError::Wait {
                    program: program.to_string(),
                    source,
                })
            }
        }
    }

    let status = child.wait().map_err(|source| ScanError::Wait {
        program: program.to_string(),
        source,
    })?;

    Ok(ProcessOutput {
        code: status.code(),
        stdout: read_capture(&mut stdout_file)?,
        stderr: read_capture(&mut stderr_file)?,
    })
}

fn read_capture(file: &mut File) -> Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Truncates diagnostic text to `max` characters, appending an ellipsis
/// marker when anything was cut.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(max).collect();
    format!("{head}...")
}
