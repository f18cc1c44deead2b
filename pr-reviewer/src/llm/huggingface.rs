//! HuggingFace inference backend.
//!
//! `POST {endpoint}/models/{model}` with the text-generation parameters the
//! review flow has always used. Instruct models echo the prompt back in
//! `generated_text`; the echoed prefix is stripped before the finding
//! parser sees the output.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::LlmError;
use crate::llm::BackendConfig;

const MAX_NEW_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.3;
const TOP_P: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    http: Client,
    cfg: BackendConfig,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(http: Client, cfg: BackendConfig, api_key: String) -> Self {
        Self { http, cfg, api_key }
    }

    /// Text-generation call; returns `[0].generated_text` without the
    /// echoed prompt.
    pub async fn analyze(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}",
            self.cfg.endpoint.trim_end_matches('/'),
            self.cfg.model
        );
        debug!("llm: POST {url}");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&GenerationRequest {
                inputs: prompt,
                parameters: GenerationParameters {
                    max_new_tokens: MAX_NEW_TOKENS,
                    temperature: TEMPERATURE,
                    top_p: TOP_P,
                },
            })
            .send()
            .await
            .map_err(LlmError::from)?;

        if !resp.status().is_success() {
            return Err(LlmError::HttpStatus(resp.status().as_u16()));
        }

        let body: Vec<Generation> = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("{e}; expected `[0].generated_text`")))?;

        let text = body
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(LlmError::EmptyResponse)?;

        let completion = text.strip_prefix(prompt).unwrap_or(&text);
        Ok(completion.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}
