//! Generation backend trait and the Groq implementation.
//!
//! The Groq API is OpenAI-compatible; any endpoint speaking that dialect
//! works through [`GroqBackend`] by pointing `base_url` at it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Model unavailable: {0}")]
    Unavailable(String),
    #[error("Request timed out")]
    Timeout,
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl GenerationError {
    /// Fatal: no fallback model will fix a bad credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, GenerationError::Auth(_))
    }

    /// Worth advancing the model chain: the model is gone or not answering.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GenerationError::Unavailable(_) | GenerationError::Timeout)
    }
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String, // "system" | "user"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub content: String,
    pub model: String,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn complete(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

// ── Groq (OpenAI-compatible) ──────────────────────────────────────────────────

pub struct GroqBackend {
    pub base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GroqBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl GenerationBackend for GroqBackend {
    async fn complete(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model":       req.model,
            "messages":    req.messages,
            "max_tokens":  req.max_tokens,
            "temperature": req.temperature,
        });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = resp.status().as_u16();
        let json: serde_json::Value = resp.json().await.map_err(classify_transport_error)?;
        if status >= 400 {
            return Err(classify_api_error(status, &json));
        }

        Ok(GenerationResponse {
            content: json["choices"][0]["message"]["content"]
                .as_str()
                .unwrap_or("")
                .to_string(),
            model: json["model"].as_str().unwrap_or(&req.model).to_string(),
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Http(err)
    }
}

/// Split API failures into the classes the fallback chain cares about.
fn classify_api_error(status: u16, json: &serde_json::Value) -> GenerationError {
    let message = json["error"]["message"]
        .as_str()
        .or_else(|| json["message"].as_str())
        .unwrap_or("unknown API error")
        .to_string();

    if status == 401 || status == 403 {
        return GenerationError::Auth(message);
    }
    let lowered = message.to_lowercase();
    if status == 404
        || lowered.contains("decommissioned")
        || lowered.contains("deprecated")
        || lowered.contains("does not exist")
    {
        return GenerationError::Unavailable(message);
    }
    GenerationError::Api { status, message }
}
