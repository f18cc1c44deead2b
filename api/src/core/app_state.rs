use pr_reviewer::github::GitHubConfig;
use pr_reviewer::llm::LlmConfig;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// GitHub API base + token ("Authorization: Bearer" PAT or app token).
    pub github: GitHubConfig,
    /// LLM backend profiles; the route may override the selected backend
    /// per request via the `model_type` query parameter.
    pub llm: LlmConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Self {
        Self {
            github: GitHubConfig {
                base_api: std::env::var("GITHUB_API_BASE")
                    .unwrap_or_else(|_| "https://api.github.com".into()),
                token: std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN is required"),
            },
            llm: LlmConfig::from_env(),
        }
    }
}
