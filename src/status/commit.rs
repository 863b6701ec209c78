//! Last commit metadata from git.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use super::error::{StatusError, StatusResult};

/// `git log` format: one field per line, subject last
const LOG_FORMAT: &str = "--format=%H%n%an%n%ae%n%aI%n%s";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub email: String,
    /// Author date, ISO 8601
    pub date: String,
    pub message: String,
}

impl CommitInfo {
    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Run `git log -1` in `repository` and parse its output
pub async fn read_last_commit(repository: &Path, timeout: Duration) -> StatusResult<CommitInfo> {
    let output = Command::new("git")
        .args(["log", "-1", LOG_FORMAT])
        .current_dir(repository)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, output)
        .await
        .map_err(|_| StatusError::Timeout {
            seconds: timeout.as_secs(),
        })?
        .map_err(|e| StatusError::git(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StatusError::git(stderr.trim().to_string()));
    }

    parse_log_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse output produced with [`LOG_FORMAT`]
pub fn parse_log_output(stdout: &str) -> StatusResult<CommitInfo> {
    let mut lines = stdout.lines();
    let mut next = |field: &str| {
        lines
            .next()
            .map(str::to_string)
            .ok_or_else(|| StatusError::git(format!("missing {} in git output", field)))
    };

    let hash = next("hash")?;
    if hash.is_empty() {
        return Err(StatusError::git("empty git output"));
    }

    Ok(CommitInfo {
        hash,
        author: next("author")?,
        email: next("email")?,
        date: next("date")?,
        message: next("message")?,
    })
}
