//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Provider-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - No dynamic dispatch, no async-trait, ergonomic `?` via `From` impls.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ReviewResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Source-control provider (GitHub) related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// AI backend (OpenAI/HuggingFace) related failure.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Configuration problems (bad/missing tokens, base URL, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input validation errors (malformed PR URL, bad PR number, etc.).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Detailed provider-specific error used inside the GitHub client layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// AI backend errors (analysis call failed or produced no usable text).
#[derive(Debug, Error)]
pub enum LlmError {
    /// Non-success HTTP status from the AI endpoint.
    #[error("llm http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("llm timeout")]
    Timeout,

    /// Network/transport failure without status.
    #[error("llm network error: {0}")]
    Network(String),

    /// Response body did not have the expected shape.
    #[error("llm decode error: {0}")]
    Decode(String),

    /// The backend answered but produced no completion text.
    #[error("llm returned an empty response")]
    EmptyResponse,
}

/// Configuration and setup errors (base API URL, missing token, etc.).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing provider token")]
    MissingToken,

    #[error("missing api key for model backend: {0}")]
    MissingApiKey(String),

    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if e.is_decode() {
            return ProviderError::InvalidResponse(e.to_string());
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => ProviderError::Unauthorized,
                403 => ProviderError::Forbidden,
                404 => ProviderError::NotFound,
                429 => ProviderError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => ProviderError::Server(code),
                _ => ProviderError::HttpStatus(code),
            };
        }
        ProviderError::Network(e.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return LlmError::Timeout;
        }
        if let Some(status) = e.status() {
            return LlmError::HttpStatus(status.as_u16());
        }
        if e.is_decode() {
            return LlmError::Decode(e.to_string());
        }
        LlmError::Network(e.to_string())
    }
}
