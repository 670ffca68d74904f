//! Language-model access for recipe generation.
//!
//! This module provides:
//! - `AiClient` trait for abstracting the chat-completion provider
//! - `HttpAiClient`, a single-attempt client for OpenAI-compatible endpoints (SambaNova by default)
//! - `FakeAiClient`, a canned-response client for tests and offline runs
//! - Configuration via environment variables
//! - The recipe prompt catalog
//!
//! # Configuration
//!
//! - `PANTRY_AI_PROVIDER` (optional): "sambanova" (default) or "fake"
//! - `SAMBANOVA_API_KEY` (required for "sambanova"): API key
//! - `PANTRY_AI_MODEL` (optional): Model name
//! - `PANTRY_AI_BASE_URL` (optional): API base URL
//! - `PANTRY_AI_TIMEOUT_SECS` (optional): Per-request timeout
//!
//! # Example
//!
//! ```ignore
//! use pantry_core::ai::{AiClient, ChatMessage, ChatRequest, HttpAiClient};
//!
//! let client = HttpAiClient::from_env()?;
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("Hello!")],
//!     ..Default::default()
//! };
//! let response = client.complete("test", request).await?;
//! println!("{}", response.content);
//! ```

mod client;
mod config;
mod fake;
pub mod prompts;
mod types;

use std::sync::Arc;

pub use client::{AiClient, AiError, HttpAiClient};
pub use config::{AiConfig, ConfigError, Provider};
pub(crate) use config::parse_bool_flag;
pub use fake::{FakeAiClient, SAMPLE_RECIPE_RESPONSE};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

/// Build the client selected by `PANTRY_AI_PROVIDER`.
pub fn create_client_from_env() -> Result<Arc<dyn AiClient>, AiError> {
    match Provider::from_env()? {
        Provider::Fake => Ok(Arc::new(FakeAiClient::with_sample_recipe())),
        Provider::SambaNova => Ok(Arc::new(HttpAiClient::from_env()?)),
    }
}
