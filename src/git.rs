// src/git.rs
//! Git collaborators: change detection for affected-only scans and the
//! friendly repository name shown in the report header.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::process::{self, run_with_timeout};

const NAME_TIMEOUT: Duration = Duration::from_secs(10);

/// Lists paths changed against `origin/<base_ref>` via `git diff`.
///
/// # Errors
/// Returns error if git cannot be spawned, times out, or exits non-zero.
/// Callers degrade to a full scan on any failure.
pub fn changed_files(repo: &Path, base_ref: &str, timeout: Duration) -> Result<Vec<String>> {
    let args = vec![
        "diff".to_string(),
        "--name-only".to_string(),
        format!("origin/{base_ref}...HEAD"),
    ];
    let output = run_with_timeout("git", &args, repo, timeout)?;

    if !output.success() {
        anyhow::bail!(
            "git diff failed: {}",
            process::excerpt(&output.stderr, 200)
        );
    }

    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Derives a display name for the repository. Never fails: falls back to
/// the directory name when no usable git remote exists.
#[must_use]
pub fn repo_name(repo: &Path) -> String {
    let args = vec![
        "remote".to_string(),
        "get-url".to_string(),
        "origin".to_string(),
    ];
    if let Ok(output) = run_with_timeout("git", &args, repo, NAME_TIMEOUT) {
        let url = output.stdout.trim();
        if output.success() && !url.is_empty() {
            return name_from_remote(url);
        }
    }
    directory_name(repo)
}

fn name_from_remote(url: &str) -> String {
    if !url.contains("github.com") {
        return "Local Repository".to_string();
    }
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() >= 2 {
        let owner = parts[parts.len() - 2];
        // SSH remotes look like git@github.com:owner/repo.git
        let owner = owner.rsplit(':').next().unwrap_or(owner);
        let repo = parts[parts.len() - 1].trim_end_matches(".git");
        format!("{owner}/{repo}")
    } else {
        "Unknown Repository".to_string()
    }
}

fn directory_name(repo: &Path) -> String {
    repo.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Repository".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_https_remote() {
        assert_eq!(
            name_from_remote("https://github.com/junovhs/axescan.git"),
            "junovhs/axescan"
        );
    }

    #[test]
    fn test_name_from_ssh_remote() {
        assert_eq!(
            name_from_remote("git@github.com:junovhs/axescan.git"),
            "junovhs/axescan"
        );
    }

    #[test]
    fn test_non_github_remote_is_local() {
        assert_eq!(
            name_from_remote("https://gitlab.com/someone/thing.git"),
            "Local Repository"
        );
    }

    #[test]
    fn test_directory_name_fallback() {
        assert_eq!(directory_name(Path::new("/tmp/my-repo")), "my-repo");
    }
}
