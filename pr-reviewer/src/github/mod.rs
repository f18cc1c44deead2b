//! GitHub provider (REST v3) for PR metadata, changed files and reviews.
//!
//! Endpoints used:
//! - GET  /repos/{owner}/{repo}/pulls/{number}
//! - GET  /repos/{owner}/{repo}/pulls/{number}/files   (field "patch" is unified diff)
//! - POST /repos/{owner}/{repo}/pulls/{number}/reviews
//! - POST /repos/{owner}/{repo}/pulls/{number}/comments
//!
//! Credentials are attached per request; the client holds no mutable
//! default headers, so concurrent use is safe.

pub mod types;
pub use types::*;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigError, ReviewResult};
use crate::locator::PrLocator;
use crate::review::aggregate::PlannedComment;

/// Runtime configuration for the GitHub client.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Personal access token or app installation token.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    /// Constructs a client from config. The token must be non-empty and the
    /// base URL must use http(s).
    pub fn new(cfg: GitHubConfig) -> ReviewResult<Self> {
        if cfg.token.trim().is_empty() {
            return Err(ConfigError::MissingToken.into());
        }
        let base = cfg.base_api.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(cfg.base_api.clone()).into());
        }
        let http = Client::builder().user_agent("code-review-bot/0.1").build()?;
        Ok(Self {
            http,
            base_api: base.to_string(),
            token: cfg.token,
        })
    }

    /// Fetches PR metadata; gives the head SHA review comments bind to.
    pub async fn get_pull_request(&self, id: &PrLocator) -> ReviewResult<PullRequest> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_api, id.owner, id.repo, id.number
        );
        debug!("github: GET {url}");
        let resp: GitHubPr = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PullRequest {
            number: resp.number,
            title: resp.title,
            state: resp.state,
            html_url: resp.html_url,
            head_sha: resp.head.sha,
            base_sha: resp.base.sha,
            author_login: resp.user.map(|u| u.login),
            created_at: resp.created_at,
            updated_at: resp.updated_at,
        })
    }

    /// Fetches the changed files with their unified-diff patches.
    pub async fn get_pull_request_files(
        &self,
        id: &PrLocator,
    ) -> ReviewResult<Vec<PullRequestFile>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.base_api, id.owner, id.repo, id.number
        );
        debug!("github: GET {url}");
        let raw: Vec<GitHubPrFile> = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let files = raw
            .into_iter()
            .map(|f| PullRequestFile {
                file_name: f.filename,
                status: f.status,
                patch: f.patch,
                additions: f.additions,
                deletions: f.deletions,
            })
            .collect();

        Ok(files)
    }

    /// Creates the review container all comments of this run attach to.
    pub async fn create_review(&self, id: &PrLocator, commit_sha: &str) -> ReviewResult<Review> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_api, id.owner, id.repo, id.number
        );
        debug!("github: POST {url}");
        let resp: GitHubReview = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&CreateReviewBody {
                commit_id: commit_sha,
                body: "Automated code review",
                event: "COMMENT",
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Review { id: resp.id })
    }

    /// Posts one inline review comment at a diff position.
    pub async fn create_review_comment(
        &self,
        id: &PrLocator,
        commit_sha: &str,
        review_id: u64,
        comment: &PlannedComment,
    ) -> ReviewResult<()> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/comments",
            self.base_api, id.owner, id.repo, id.number
        );
        debug!(
            "github: POST {url} path={} position={} review_id={review_id}",
            comment.path, comment.position
        );
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&CreateReviewCommentBody {
                commit_id: commit_sha,
                path: &comment.path,
                position: comment.position,
                body: &comment.body,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// --- GitHub response/request shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct GitHubPr {
    number: u64,
    title: String,
    state: String,
    html_url: String,
    head: GitHubRef,
    base: GitHubRef,
    #[serde(default)]
    user: Option<GitHubUser>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct GitHubRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubPrFile {
    filename: String,
    status: String,
    #[serde(default)]
    patch: Option<String>,
    #[serde(default)]
    additions: u32,
    #[serde(default)]
    deletions: u32,
}

#[derive(Debug, Deserialize)]
struct GitHubReview {
    id: u64,
}

#[derive(Debug, Serialize)]
struct CreateReviewBody<'a> {
    commit_id: &'a str,
    body: &'a str,
    event: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateReviewCommentBody<'a> {
    commit_id: &'a str,
    path: &'a str,
    position: u32,
    body: &'a str,
}
