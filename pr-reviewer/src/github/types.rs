//! Normalized GitHub data model for pull requests and changed files.
//!
//! These types are the "normalized output" of the provider layer and are
//! what the review orchestrator consumes; the raw REST shapes stay private
//! to the client module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// High-level metadata for a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// "open" | "closed".
    pub state: String,
    pub html_url: String,
    /// Head commit SHA; review comments bind to it.
    pub head_sha: String,
    pub base_sha: String,
    pub author_login: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One changed file of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Repo-relative path ("src/app/main.go").
    pub file_name: String,
    /// "added" | "modified" | "removed" | "renamed" | "copied" | ...
    pub status: String,
    /// Unified diff for this file; absent for binary/too-large files.
    pub patch: Option<String>,
    pub additions: u32,
    pub deletions: u32,
}

impl PullRequestFile {
    /// Only modified and added files carry commentable changes; removed and
    /// change-free renamed files are skipped by the review flow.
    pub fn is_reviewable(&self) -> bool {
        matches!(self.status.as_str(), "modified" | "added")
    }
}

/// The review container created up front; all inline comments of one run
/// share its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(status: &str) -> PullRequestFile {
        PullRequestFile {
            file_name: "src/main.go".into(),
            status: status.into(),
            patch: Some("@@ -1,1 +1,1 @@\n+x\n".into()),
            additions: 1,
            deletions: 0,
        }
    }

    #[test]
    fn only_modified_and_added_are_reviewable() {
        assert!(file("modified").is_reviewable());
        assert!(file("added").is_reviewable());
        assert!(!file("removed").is_reviewable());
        assert!(!file("renamed").is_reviewable());
    }
}
