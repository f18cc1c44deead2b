use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use pr_reviewer::{Error, ModelKind, run_review};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::analyze::{analyze_request::AnalyzeParams, analyze_response::AnalyzeResponse},
};

/// HTTP endpoint for triggering an AI review of a pull request.
///
/// The path parameter is the (percent-encoded) PR browser URL; the optional
/// `model_type` query parameter selects the AI backend for this request.
/// On success the review comments have already been posted to the PR.
#[instrument(name = "analyze_route", skip(state, params))]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    Path(pr_url): Path<String>,
    Query(params): Query<AnalyzeParams>,
) -> Response {
    // --- Resolve the AI backend for this request -------------------------------
    let llm_cfg = match params.model_type.as_deref() {
        None => state.llm.clone(),
        Some(raw) => match ModelKind::parse(raw) {
            Some(kind) => state.llm.clone().with_kind(kind),
            None => {
                return ApiResponse::<()>::error(
                    "INVALID_MODEL_TYPE",
                    format!("unknown model type: {raw}"),
                )
                .into_response_with_status(StatusCode::BAD_REQUEST);
            }
        },
    };

    info!(%pr_url, "starting PR review trigger");

    // --- Run review pipeline ----------------------------------------------------
    match run_review(state.github.clone(), llm_cfg, &pr_url).await {
        Ok(count) => ApiResponse::success(AnalyzeResponse {
            message: "PR analyzed successfully. Comments were posted to the PR.".to_string(),
            comments_posted: count,
        })
        .into_response_with_status(StatusCode::OK),
        Err(Error::Validation(msg)) => {
            ApiResponse::<()>::error("INVALID_PR_REFERENCE", msg)
                .into_response_with_status(StatusCode::BAD_REQUEST)
        }
        Err(Error::Config(err)) => ApiResponse::<()>::error("SERVER_CONFIG_ERROR", err.to_string())
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
        Err(err) => ApiResponse::<()>::error("REVIEW_FAILED", err.to_string())
            .into_response_with_status(StatusCode::BAD_GATEWAY),
    }
}
