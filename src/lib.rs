pub mod axe;
pub mod cli;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod git;
pub mod heuristics;
pub mod process;
pub mod report;
pub mod scanner;
pub mod types;
