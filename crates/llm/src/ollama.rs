//! Ollama text-generation client.
//!
//! Talks to a locally hosted Ollama server:
//!
//! - `GET  {base_url}/api/tags` on [`TextGenerator::initialize`], to confirm the
//!   server is up and the configured model is installed.
//! - `POST {base_url}/api/generate` with `stream: false` for each prompt.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pipeline::{ModelName, TextGenerationError, TextGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection and sampling settings for [`OllamaClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`. A trailing slash is ignored.
    pub base_url: String,
    /// Model tag as known to Ollama, e.g. `llama3.1` or `mistral:7b`.
    pub model: String,
    pub temperature: f32,
    /// Upper bound on generated tokens per call (`num_predict`). `None` lets
    /// the server decide.
    pub max_tokens: Option<u32>,
    /// Timeout applied to each generation request.
    pub request_timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "llama3.1".to_string(),
            temperature: 0.7,
            max_tokens: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Invalid [`OllamaConfig`] or HTTP client construction failure.
#[derive(Debug, Error)]
pub enum OllamaConfigError {
    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("Temperature must be a finite value between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Whether `installed` names the same model as `wanted`, treating an
/// untagged name as `:latest`.
fn is_same_model(installed: &str, wanted: &str) -> bool {
    if installed == wanted {
        return true;
    }
    !wanted.contains(':') && installed.strip_suffix(":latest") == Some(wanted)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`TextGenerator`] backed by an Ollama server.
///
/// The client starts uninitialised; readiness is tracked in an atomic flag and
/// dropped again when the server stops accepting connections, so the next
/// pipeline call re-runs the health check.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: ModelName,
    temperature: f32,
    max_tokens: Option<u32>,
    request_timeout: Duration,
    available: AtomicBool,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("available", &self.available.load(Ordering::Relaxed))
            .finish()
    }
}

impl OllamaClient {
    /// Creates a client from `config`. No network traffic happens until
    /// [`TextGenerator::initialize`].
    pub fn new(config: OllamaConfig) -> Result<Self, OllamaConfigError> {
        let model = ModelName::new(config.model.trim()).ok_or(OllamaConfigError::EmptyModel)?;
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(OllamaConfigError::InvalidBaseUrl(config.base_url));
        }
        if !config.temperature.is_finite() || !(0.0..=2.0).contains(&config.temperature) {
            return Err(OllamaConfigError::InvalidTemperature(config.temperature));
        }

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout: config.request_timeout,
            available: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    #[instrument(skip(self), fields(base_url = %self.base_url, model = %self.model))]
    async fn initialize(&self) -> Result<(), TextGenerationError> {
        let url = format!("{}/api/tags", self.base_url);
        let unavailable = |reason: String| {
            self.available.store(false, Ordering::Relaxed);
            TextGenerationError::Unavailable { reason }
        };

        let response = self
            .http
            .get(&url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
            .map_err(|e| unavailable(format!("Ollama unreachable at {}: {e}", self.base_url)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!(
                "Ollama health check returned {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::InvalidResponse {
                reason: format!("Ollama tags parse error: {e}"),
            })?;

        if !tags.models.iter().any(|m| is_same_model(&m.name, self.model.as_str())) {
            warn!(installed = tags.models.len(), "configured model is not installed");
            return Err(unavailable(format!(
                "model '{}' is not installed on {}; run `ollama pull {}`",
                self.model, self.base_url, self.model
            )));
        }

        self.available.store(true, Ordering::Relaxed);
        debug!("Ollama health check passed");
        Ok(())
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(TextGenerationError::NotInitialized);
        }

        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: self.model.as_str(),
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let response = self
            .http
            .post(&url)
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    self.available.store(false, Ordering::Relaxed);
                }
                TextGenerationError::Request {
                    reason: format!("Ollama HTTP error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenerationError::Request {
                reason: format!("Ollama returned {status}: {body}"),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::InvalidResponse {
                reason: format!("Ollama JSON parse error: {e}"),
            })?;

        debug!(response_chars = body.response.len(), "generation complete");
        Ok(body.response)
    }

    fn is_initialized(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn model_name(&self) -> ModelName {
        self.model.clone()
    }
}
