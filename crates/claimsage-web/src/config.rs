//! Configuration loading for claimsage.
//! Reads claimsage.toml from the current directory or the path in the
//! CLAIMSAGE_CONFIG env var; a missing file means all defaults. The Groq
//! API key is never stored in the file, only in GROQ_API_KEY.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: String,
}

fn default_corpus_path() -> String { "data/processed/patents.json".to_string() }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { path: default_corpus_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    #[serde(default = "default_fallback_models")]
    pub fallback_models: Vec<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://api.groq.com/openai/v1".to_string() }
fn default_primary_model() -> String { "llama-3.3-70b-versatile".to_string() }
fn default_fallback_models() -> Vec<String> {
    vec![
        "llama-3.1-8b-instant".to_string(),
        "mixtral-8x7b-32768".to_string(),
        "gemma2-9b-it".to_string(),
    ]
}
fn default_temperature() -> f32 { 0.2 }
fn default_max_tokens() -> u32 { 400 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback_models: default_fallback_models(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Primary model followed by its fallbacks, in try order.
    pub fn models(&self) -> Vec<String> {
        let mut models = vec![self.primary_model.clone()];
        models.extend(self.fallback_models.iter().cloned());
        models
    }
}

impl Config {
    /// Load configuration. Checks CLAIMSAGE_CONFIG first, then
    /// ./claimsage.toml; falls back to defaults when neither exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CLAIMSAGE_CONFIG")
            .unwrap_or_else(|_| "claimsage.toml".to_string());

        if !Path::new(&path).exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The Groq API key comes from the environment only.
    pub fn api_key(&self) -> anyhow::Result<String> {
        std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY is not set"))
    }
}
