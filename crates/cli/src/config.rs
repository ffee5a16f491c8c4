//! `scribe.toml` configuration.
//!
//! Every key is optional. Resolution order, highest priority first:
//!
//! 1. Environment (`SCRIBE_MODEL`, `SCRIBE_MODEL_URL`)
//! 2. The TOML file
//! 3. Compiled defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use llm::{OllamaConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "scribe.toml";

pub const MODEL_ENV: &str = "SCRIBE_MODEL";
pub const MODEL_URL_ENV: &str = "SCRIBE_MODEL_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub model: ModelConfig,
    pub store: StoreConfig,
    pub pipeline: PipelineConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub base_url: String,
    pub name: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            name: "llama3.1".to_string(),
            temperature: 0.7,
            max_tokens: None,
            request_timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    pub fn to_ollama_config(&self) -> OllamaConfig {
        OllamaConfig {
            base_url: self.base_url.clone(),
            model: self.name.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON document holding topics and generated content.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scribe-data.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Budget for one outline or article run, model calls included.
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { timeout_secs: 900 }
    }
}

impl PipelineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Emit logs as JSON lines instead of human-readable text.
    pub json: bool,
    /// OTLP gRPC endpoint, e.g. `http://localhost:4317`. Tracing export is
    /// disabled when unset.
    pub otlp_endpoint: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl CliConfig {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when
    /// `path` is `None`.
    ///
    /// A missing default file yields defaults. A missing file that was named
    /// explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                Self::from_toml(&text).map_err(|source| ConfigError::Parse { path, source })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Parses configuration text without touching the environment.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(model) = get(MODEL_ENV) {
            self.model.name = model;
        }
        if let Some(url) = get(MODEL_URL_ENV) {
            self.model.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.model.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "model.request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.model.base_url, "http://localhost:11434");
        assert_eq!(config.model.name, "llama3.1");
        assert_eq!(config.pipeline.timeout(), Duration::from_secs(900));
        assert_eq!(config.store.path, PathBuf::from("scribe-data.json"));
        assert!(!config.telemetry.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = CliConfig::from_toml(
            r#"
            [model]
            name = "mistral:7b"
            max_tokens = 2048

            [telemetry]
            json = true
            otlp_endpoint = "http://collector:4317"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.name, "mistral:7b");
        assert_eq!(config.model.max_tokens, Some(2048));
        assert_eq!(config.model.request_timeout_secs, 120);
        assert!(config.telemetry.json);
        assert_eq!(config.telemetry.otlp_endpoint.as_deref(), Some("http://collector:4317"));

        let ollama = config.model.to_ollama_config();
        assert_eq!(ollama.model, "mistral:7b");
        assert_eq!(ollama.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(CliConfig::from_toml("[model]\nmodle = \"x\"").is_err());
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let config = CliConfig::from_toml("[model]\nname = \"from-file\"")
            .unwrap()
            .with_env_overrides(|key| match key {
                MODEL_ENV => Some("from-env".to_string()),
                MODEL_URL_ENV => Some("   ".to_string()),
                _ => None,
            });

        assert_eq!(config.model.name, "from-env");
        assert_eq!(config.model.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = CliConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scribe.toml");
        std::fs::write(&path, "[pipeline]\ntimeout_secs = \"soon\"").unwrap();

        let err = CliConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("scribe.toml"));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = CliConfig::from_toml("[pipeline]\ntimeout_secs = 0").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
