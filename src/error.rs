// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Typed failures from the subprocess plumbing. Scan-level failures are
/// represented as data (`ScanOutcome::Failed`), not as errors.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    #[error("failed waiting on `{program}`: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;

// Allow `?` on std::io::Error by converting to ScanError::Io with unknown path.
impl From<std::io::Error> for ScanError {
    fn from(source: std::io::Error) -> Self {
        ScanError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
