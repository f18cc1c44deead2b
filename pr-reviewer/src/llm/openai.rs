//! OpenAI chat-completions backend.
//!
//! Minimal, non-streaming wrapper around
//! `POST {endpoint}/v1/chat/completions`. The whole review prompt travels
//! as the system message, matching the upstream prompt contract.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::LlmError;
use crate::llm::BackendConfig;

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    cfg: BackendConfig,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: Client, cfg: BackendConfig, api_key: String) -> Self {
        Self { http, cfg, api_key }
    }

    /// Non-streaming chat completion; returns `choices[0].message.content`.
    pub async fn analyze(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.cfg.endpoint.trim_end_matches('/')
        );
        debug!("llm: POST {url} model={}", self.cfg.model);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionRequest {
                model: &self.cfg.model,
                messages: vec![ChatMessage {
                    role: "system",
                    content: prompt,
                }],
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .send()
            .await
            .map_err(LlmError::from)?;

        if !resp.status().is_success() {
            return Err(LlmError::HttpStatus(resp.status().as_u16()));
        }

        let body: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("{e}; expected `choices[0].message.content`")))?;

        body.choices
            .into_iter()
            .find_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
