// src/console.rs
//! Timestamped console output and the in-place scan progress bar.

use chrono::Local;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Success,
    Error,
}

/// Prints a timestamped status line with a level glyph.
pub fn status(message: &str, level: Level) {
    let ts = Local::now().format("%H:%M:%S");
    match level {
        Level::Error => println!("[{ts}] {} {message}", "✗".red().bold()),
        Level::Warn => println!("[{ts}] {} {message}", "!".yellow().bold()),
        Level::Success => println!("[{ts}] {} {message}", "✓".green().bold()),
        Level::Info => println!("[{ts}] {} {message}", "·".cyan()),
    }
}

/// Redraws a progress bar on the current line. Prints a newline on completion.
pub fn progress(current: usize, total: usize, description: &str) {
    if total == 0 {
        return;
    }
    const BAR_LEN: usize = 30;
    let filled = BAR_LEN * current / total;
    let bar: String = "█".repeat(filled) + &"-".repeat(BAR_LEN - filled);
    #[allow(clippy::cast_precision_loss)]
    let pct = (current as f64 / total as f64) * 100.0;
    print!("\r[{bar}] {pct:.1}% {description}");
    let _ = std::io::stdout().flush();
    if current == total {
        println!();
    }
}
