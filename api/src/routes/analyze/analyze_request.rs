use serde::Deserialize;

/// Query parameters for the analyze endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Optional AI backend override: "openai" or "hugging_face".
    /// Defaults to the server-configured backend.
    pub model_type: Option<String>,
}
