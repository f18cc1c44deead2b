use serde::Serialize;

/// Success payload for the analyze endpoint.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub comments_posted: usize,
}
