//! Chat-completion client for OpenAI-compatible endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{AiConfig, ConfigError};
use super::types::{ChatRequest, ChatResponse, Usage};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response envelope: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Trait for AI clients.
///
/// Implementations make exactly one attempt per call; retrying is the caller's decision.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request.
    ///
    /// The `prompt_name` identifies the prompt for logging.
    async fn complete(&self, prompt_name: &str, request: ChatRequest)
        -> Result<ChatResponse, AiError>;

    /// Model identifier sent with each request.
    fn model_name(&self) -> &str;
}

/// AI client for SambaNova and other OpenAI-compatible chat completion APIs.
#[derive(Debug)]
pub struct HttpAiClient {
    client: reqwest::Client,
    config: AiConfig,
}

/// Wire format of a chat completion request.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a ChatRequest,
}

/// Wire format of a chat completion response.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl HttpAiClient {
    /// Create a new client from environment configuration.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env()?;
        Self::new(config)
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AiClient for HttpAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let body = CompletionRequest {
            model: &self.config.model,
            request: &request,
        };

        tracing::debug!(
            prompt_name = prompt_name,
            model = %self.config.model,
            "Calling AI API"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let envelope: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        extract_response(envelope)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Pull the first choice's text out of the envelope.
///
/// Blank text is still a response; only a missing choice or null content is malformed.
fn extract_response(envelope: CompletionResponse) -> Result<ChatResponse, AiError> {
    let content = envelope
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AiError::MalformedResponse("No text content in response".to_string()))?;

    Ok(ChatResponse {
        content,
        usage: envelope.usage.unwrap_or_default(),
    })
}
