//! Public entry for the pr-reviewer pipeline.
//!
//! Single high-level function to run an AI review for one pull request:
//!
//! 1) **Validate** — parse the PR reference URL (fails before any network
//!    call on a malformed reference).
//! 2) **Fetch** — PR metadata and changed files from GitHub; create the
//!    shared review container.
//! 3) **Analyze & place** — per modified/added file: prompt the configured
//!    AI backend, parse its line-protocol output into findings, resolve
//!    each finding's line number to a diff position (nearest-line fallback
//!    for off-by-a-few model output), group and render one comment per
//!    anchor line.
//! 4) **Post** — inline review comments in deterministic order.
//!
//! The pipeline uses `tracing` for debug logging and avoids `async-trait`
//! and heap trait objects (no `Box<dyn ...>`). It relies on plain
//! `async fn` and enum-dispatch over thin provider/LLM clients.

pub mod diff;
pub mod errors;
pub mod github;
pub mod llm;
pub mod locator;
pub mod review;

use tracing::debug;

use errors::ReviewResult;
use github::{GitHubClient, GitHubConfig};
use llm::{LlmClient, LlmConfig};
use locator::PrLocator;

/// Runs the whole pipeline for the pull request behind `pr_url` and
/// returns the number of inline comments posted.
///
/// This is the **single public entry** to call from an HTTP handler or a
/// CLI. Configuration problems (missing token/key) and a malformed URL
/// surface before any network traffic.
pub async fn run_review(
    github_cfg: GitHubConfig,
    llm_cfg: LlmConfig,
    pr_url: &str,
) -> ReviewResult<usize> {
    let id = PrLocator::parse(pr_url)?;
    debug!("run_review: target {}/{}#{}", id.owner, id.repo, id.number);

    let github = GitHubClient::new(github_cfg)?;
    let llm = LlmClient::from_config(llm_cfg)?;

    review::review_pull_request(&github, &llm, &id).await
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use errors::Error;
pub use github::GitHubConfig as ReviewerGitHubConfig;
pub use llm::{LlmConfig as ReviewerLlmConfig, ModelKind};
pub use locator::PrLocator as ReviewerPrLocator;
