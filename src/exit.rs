// src/exit.rs
//! Standardized process exit codes for `axescan`.
//!
//! Provides a stable contract for CI scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AxescanExit {
    /// Scan completed and both reports were written.
    Success = 0,
    /// Unhandled top-level error (IO, report write, invalid config).
    Error = 1,
}

impl AxescanExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for AxescanExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for AxescanExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => {
                eprintln!("Error: {e:#}");
                Self::Error
            }
        }
    }
}
