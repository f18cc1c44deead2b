//! Review orchestration: fetch → analyze → place → post.
//!
//! Files are processed sequentially: the comment-creation API is
//! rate-limited per PR, and a fixed posting order is what makes the
//! severity/category rendering contract observable. The shared review
//! container is created once, before the per-file loop.
//!
//! The per-file placement half (`plan_file_comments`) is a pure function
//! over `(patch, model output)`, so the engine is testable without either
//! network collaborator.

pub mod aggregate;
pub mod findings;
pub mod prompt;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::diff::DiffInfo;
use crate::diff::resolve::resolve_line;
use crate::errors::ReviewResult;
use crate::github::GitHubClient;
use crate::llm::LlmClient;
use crate::locator::PrLocator;
use aggregate::{PlannedComment, plan_comments};
use findings::parse_findings;
use prompt::build_review_prompt;

/// Runs the full review flow for one pull request and returns the number
/// of inline comments posted.
pub async fn review_pull_request(
    github: &GitHubClient,
    llm: &LlmClient,
    id: &PrLocator,
) -> ReviewResult<usize> {
    let t0 = Instant::now();

    debug!("review: fetch metadata {}/{}#{}", id.owner, id.repo, id.number);
    let pr = github.get_pull_request(id).await?;
    debug!("review: head_sha={}", pr.head_sha);

    let files = github.get_pull_request_files(id).await?;
    debug!("review: files fetched, count={}", files.len());

    // One review container up front; every comment of this run shares it.
    let review = github.create_review(id, &pr.head_sha).await?;
    debug!("review: container created, review_id={}", review.id);

    let mut posted = 0usize;
    for file in &files {
        if !file.is_reviewable() {
            debug!("review: skip file={} status={}", file.file_name, file.status);
            continue;
        }
        let Some(patch) = file.patch.as_deref().filter(|p| !p.is_empty()) else {
            debug!("review: skip file={} (no patch)", file.file_name);
            continue;
        };

        let t_file = Instant::now();
        let file_name = base_name(&file.file_name);
        let raw = llm.analyze(&build_review_prompt(file_name, patch)).await?;

        let planned = plan_file_comments(&file.file_name, file_name, patch, &raw);
        debug!(
            "review: file={} comments={} ({} ms)",
            file.file_name,
            planned.len(),
            t_file.elapsed().as_millis()
        );

        for comment in &planned {
            github
                .create_review_comment(id, &pr.head_sha, review.id, comment)
                .await?;
            posted += 1;
        }
    }

    info!(
        "review: done {}/{}#{} files={} comments={} in {} ms",
        id.owner,
        id.repo,
        id.number,
        files.len(),
        posted,
        t0.elapsed().as_millis()
    );

    Ok(posted)
}

/// The pure per-file half of the flow: parse the patch, parse the model
/// output, keep findings addressed to this file, resolve each to a diff
/// position and fold them into one rendered comment per anchor line.
///
/// Zero planned comments is a normal outcome (the model reported nothing
/// actionable, or nothing it reported was addressed to this file).
pub fn plan_file_comments(
    path: &str,
    file_name: &str,
    patch: &str,
    raw_model_output: &str,
) -> Vec<PlannedComment> {
    let diff = DiffInfo::parse(patch);

    let mut located = Vec::new();
    for finding in parse_findings(raw_model_output) {
        if !finding.file_name.eq_ignore_ascii_case(file_name) {
            continue;
        }
        match resolve_line(&diff, finding.line_number) {
            Some(resolved) => located.push((resolved, finding)),
            None => warn!(
                "review: dropping unresolvable finding file={} line={}",
                finding.file_name, finding.line_number
            ),
        }
    }

    plan_comments(path, located)
}

/// Base name of a repo-relative path; the model is prompted with (and
/// echoes back) the file name without directories.
fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
