//! Fake AI client for testing.
//!
//! Returns deterministic responses based on prompt matching, so tests and offline
//! runs work without network access or API costs.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError, RwLock};

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A plausible model response in the shape the recipe prompts tend to produce.
pub const SAMPLE_RECIPE_RESPONSE: &str = "**Recipe: Golden Pantry Frittata**

**Tastiness Rating: 8.5/10**

**Ingredients:**
* 6 large eggs
* 1 cup spinach
* 1/2 cup grated cheddar
- Salt and pepper to taste

**Instructions:**
1. Preheat the oven: heat to 375°F (190°C).
2. Whisk the eggs with salt and pepper.
3. Wilt the spinach in an oven-safe skillet.
4. Pour in the eggs, top with cheddar and bake for 15 minutes.

**Tips and Variations:**
* Swap spinach for kale or chard.
* Add leftover roasted vegetables.

This recipe combines pantry staples into a quick, satisfying meal.";

/// A fake AI client for testing.
///
/// Responses are matched by checking if the prompt contains a registered substring
/// (case-insensitive). Every call is counted, including failed ones.
#[derive(Debug, Default)]
pub struct FakeAiClient {
    /// Prompt substring -> response, checked in insertion order.
    responses: RwLock<Vec<(String, String)>>,
    /// Returned when no pattern matches.
    default_response: Option<String>,
    /// When set, every call fails with this message.
    failure: Option<String>,
    /// Every request received, in order.
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeAiClient {
    /// Create a FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeAiClient that answers every prompt with the same text.
    pub fn with_default_response(response: &str) -> Self {
        Self {
            default_response: Some(response.to_string()),
            ..Self::default()
        }
    }

    /// Create a FakeAiClient that answers every prompt with [`SAMPLE_RECIPE_RESPONSE`].
    pub fn with_sample_recipe() -> Self {
        Self::with_default_response(SAMPLE_RECIPE_RESPONSE)
    }

    /// Create a FakeAiClient whose every call fails, as an unreachable provider would.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        if let Ok(mut responses) = self.responses.write() {
            responses.push((prompt_contains.to_lowercase(), response.to_string()));
        }
    }

    /// Number of times `complete` has been called.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        _prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(message) = &self.failure {
            return Err(AiError::RequestFailed(message.clone()));
        }

        let prompt = request
            .messages
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        let matched = self.responses.read().ok().and_then(|responses| {
            responses
                .iter()
                .find(|(pattern, _)| prompt.contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
        });

        match matched.or_else(|| self.default_response.clone()) {
            Some(content) => Ok(ChatResponse {
                content,
                usage: Usage::default(),
            }),
            None => Err(AiError::RequestFailed(format!(
                "FakeAiClient: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
