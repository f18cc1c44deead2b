//! AI backend facade w/o async-trait or dynamic trait objects.
//!
//! Which backend analyzes a patch is explicit configuration, not runtime
//! type inspection: `ModelKind` selects a concrete client behind the
//! `LlmClient` enum. Both backends take the same prompt and return opaque
//! raw text for the finding parser.

mod huggingface;
mod openai;

pub use huggingface::HuggingFaceClient;
pub use openai::OpenAiClient;

use std::time::Duration;

use crate::errors::{ConfigError, Error, LlmError};

/// Supported AI backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    HuggingFace,
    OpenAi,
}

impl ModelKind {
    /// Parses the external model-type key ("hugging_face", "openai", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "huggingface" | "hugging_face" => Some(Self::HuggingFace),
            "openai" | "open_ai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

/// Per-backend endpoint/model/key settings.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Full LLM configuration: the selected backend plus both backend profiles.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub kind: ModelKind,
    pub openai: BackendConfig,
    pub huggingface: BackendConfig,
}

impl LlmConfig {
    /// Loads backend profiles from environment variables. The default
    /// backend is HuggingFace unless `REVIEW_MODEL` says otherwise.
    pub fn from_env() -> Self {
        let kind = std::env::var("REVIEW_MODEL")
            .ok()
            .and_then(|s| ModelKind::parse(&s))
            .unwrap_or(ModelKind::HuggingFace);

        LlmConfig {
            kind,
            openai: BackendConfig {
                endpoint: std::env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com".into()),
                model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".into()),
                api_key: std::env::var("OPENAI_API_KEY").ok(),
            },
            huggingface: BackendConfig {
                endpoint: std::env::var("HUGGINGFACE_API_BASE")
                    .unwrap_or_else(|_| "https://api-inference.huggingface.co".into()),
                model: std::env::var("HUGGINGFACE_MODEL")
                    .unwrap_or_else(|_| "mistralai/Mistral-7B-Instruct-v0.3".into()),
                api_key: std::env::var("HUGGINGFACE_API_KEY").ok(),
            },
        }
    }

    /// Same profiles with a different selected backend.
    pub fn with_kind(mut self, kind: ModelKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Concrete AI client (enum-dispatch).
#[derive(Debug, Clone)]
pub enum LlmClient {
    HuggingFace(HuggingFaceClient),
    OpenAi(OpenAiClient),
}

impl LlmClient {
    /// Constructs the configured backend. The selected backend's API key
    /// must be present.
    pub fn from_config(cfg: LlmConfig) -> Result<Self, Error> {
        Ok(match cfg.kind {
            ModelKind::HuggingFace => {
                let key = require_key(&cfg.huggingface, "huggingface")?;
                Self::HuggingFace(HuggingFaceClient::new(http_client()?, cfg.huggingface, key))
            }
            ModelKind::OpenAi => {
                let key = require_key(&cfg.openai, "openai")?;
                Self::OpenAi(OpenAiClient::new(http_client()?, cfg.openai, key))
            }
        })
    }

    /// Sends the review prompt and returns the model's raw text.
    pub async fn analyze(&self, prompt: &str) -> Result<String, LlmError> {
        match self {
            Self::HuggingFace(c) => c.analyze(prompt).await,
            Self::OpenAi(c) => c.analyze(prompt).await,
        }
    }
}

fn require_key(cfg: &BackendConfig, backend: &str) -> Result<String, Error> {
    cfg.api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingApiKey(backend.to_string()).into())
}

fn http_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("code-review-bot/0.1")
        .build()
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_kind_parses_external_keys() {
        assert_eq!(ModelKind::parse("OpenAI"), Some(ModelKind::OpenAi));
        assert_eq!(ModelKind::parse("open_ai"), Some(ModelKind::OpenAi));
        assert_eq!(
            ModelKind::parse("hugging_face"),
            Some(ModelKind::HuggingFace)
        );
        assert_eq!(ModelKind::parse("llama"), None);
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let cfg = LlmConfig {
            kind: ModelKind::OpenAi,
            openai: BackendConfig {
                endpoint: "https://api.openai.com".into(),
                model: "gpt-4".into(),
                api_key: None,
            },
            huggingface: BackendConfig {
                endpoint: "https://api-inference.huggingface.co".into(),
                model: "mistralai/Mistral-7B-Instruct-v0.3".into(),
                api_key: None,
            },
        };
        assert!(matches!(
            LlmClient::from_config(cfg),
            Err(Error::Config(ConfigError::MissingApiKey(_)))
        ));
    }
}
