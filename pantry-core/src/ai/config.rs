//! AI configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default SambaNova (OpenAI-compatible) base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.sambanova.ai/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "Meta-Llama-3.1-70B-Instruct";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which chat-completion backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    SambaNova,
    Fake,
}

impl Provider {
    /// Read `PANTRY_AI_PROVIDER`, defaulting to SambaNova.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("PANTRY_AI_PROVIDER") {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::SambaNova),
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sambanova" | "" => Ok(Self::SambaNova),
            "fake" => Ok(Self::Fake),
            _ => Err(ConfigError::InvalidValue {
                name: "PANTRY_AI_PROVIDER".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token for the provider.
    pub api_key: String,
    /// Model name (e.g., "Meta-Llama-3.1-70B-Instruct").
    pub model: String,
    /// Base URL for the API; `/chat/completions` is appended.
    pub base_url: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SAMBANOVA_API_KEY`: API key
    ///
    /// Optional:
    /// - `PANTRY_AI_MODEL`: Model name (default: "Meta-Llama-3.1-70B-Instruct")
    /// - `PANTRY_AI_BASE_URL`: API base URL (default: "https://api.sambanova.ai/v1")
    /// - `PANTRY_AI_TIMEOUT_SECS`: Request timeout (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("SAMBANOVA_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("SAMBANOVA_API_KEY".to_string()))?;

        let model = env::var("PANTRY_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("PANTRY_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("PANTRY_AI_TIMEOUT_SECS") {
            Ok(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PANTRY_AI_TIMEOUT_SECS".to_string(),
                value: v,
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Parse a boolean flag the way the environment usually spells it.
pub(crate) fn parse_bool_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
