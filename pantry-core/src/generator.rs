//! Recipe generation: prompt selection, one model call, parsing and caching.

use std::env;
use std::sync::Arc;

use crate::ai::prompts::{format_recipe_prompt, PromptCatalog, PromptStyle, RECIPE_PROMPT_NAME};
use crate::ai::{create_client_from_env, AiClient, AiError, ChatMessage, ChatRequest, ConfigError};
use crate::cache::{CacheKey, RecipeCache};
use crate::error::RecipeError;
use crate::parser::parse_recipe;
use crate::types::{ButtonState, StructuredRecipe};

/// Nucleus sampling cutoff sent with every recipe request.
pub const RECIPE_TOP_P: f32 = 0.1;

/// Output token cap for a recipe.
pub const RECIPE_MAX_TOKENS: u32 = 1000;

pub const RECIPE_PRESENCE_PENALTY: f32 = 0.6;
pub const RECIPE_FREQUENCY_PENALTY: f32 = 0.3;

/// Orchestrator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Store parse-failure records in the cache like successful recipes.
    ///
    /// Only input that is not valid UTF-8 yields a parse-failure record, and model
    /// responses reach the generator as `String`s, so through [`RecipeGenerator::generate`]
    /// this never fires. It governs [`RecipeCache::insert`] and
    /// [`RecipeCache::get_or_create`] for callers that feed raw bytes through
    /// [`crate::parse_recipe_bytes`].
    pub cache_parse_failures: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            cache_parse_failures: true,
        }
    }
}

impl GeneratorOptions {
    /// Load options from environment variables.
    ///
    /// Optional:
    /// - `PANTRY_CACHE_PARSE_FAILURES`: Cache parse-failure records (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_parse_failures = match env::var("PANTRY_CACHE_PARSE_FAILURES") {
            Ok(v) => crate::ai::parse_bool_flag("PANTRY_CACHE_PARSE_FAILURES", &v)?,
            Err(_) => true,
        };
        Ok(Self {
            cache_parse_failures,
        })
    }
}

/// Generates recipes from a list of ingredient names.
///
/// Owns its cache; construct one per process and share it by reference or `Arc`.
pub struct RecipeGenerator {
    client: Arc<dyn AiClient>,
    catalog: PromptCatalog,
    cache: RecipeCache,
}

impl RecipeGenerator {
    pub fn new(client: Arc<dyn AiClient>, options: GeneratorOptions) -> Self {
        Self {
            client,
            catalog: PromptCatalog::default(),
            cache: RecipeCache::new(options.cache_parse_failures),
        }
    }

    /// Build a generator with the client and options described by the environment.
    pub fn from_env() -> Result<Self, AiError> {
        let client = create_client_from_env()?;
        let options = GeneratorOptions::from_env()?;
        Ok(Self::new(client, options))
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    /// Generate (or recall) a recipe for these ingredients and button state.
    ///
    /// Fails with `InvalidArgument` for an empty ingredient list, before any model call,
    /// and with `UpstreamUnavailable` when the model call fails. Upstream failures are
    /// not cached, so calling again retries.
    pub async fn generate(
        &self,
        ingredients: &[String],
        button_state: ButtonState,
    ) -> Result<StructuredRecipe, RecipeError> {
        if ingredients.is_empty() {
            return Err(RecipeError::InvalidArgument(
                "At least one ingredient is required to generate a recipe".to_string(),
            ));
        }

        let key = CacheKey::new(ingredients, button_state);
        self.cache
            .get_or_create(key, || self.generate_uncached(ingredients, button_state))
            .await
    }

    async fn generate_uncached(
        &self,
        ingredients: &[String],
        button_state: ButtonState,
    ) -> Result<StructuredRecipe, RecipeError> {
        let style = self.catalog.select(button_state);
        let request = recipe_request(style, ingredients);

        tracing::debug!(
            style = %style.kind,
            button_state = %button_state,
            ingredient_count = ingredients.len(),
            "Requesting recipe from model"
        );

        let response = self
            .client
            .complete(RECIPE_PROMPT_NAME, request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    style = %style.kind,
                    model = self.client.model_name(),
                    "Recipe model call failed"
                );
                RecipeError::UpstreamUnavailable
            })?;

        let recipe = parse_recipe(&response.content);
        if let Some(error) = &recipe.error {
            tracing::warn!(error = %error, "Model response could not be parsed");
        }

        tracing::info!(
            title = %recipe.title,
            style = %style.kind,
            completion_tokens = response.usage.completion_tokens,
            "Generated recipe"
        );

        Ok(recipe)
    }
}

/// The chat request for one recipe: a single user message with the style's temperature
/// and the fixed sampling parameters.
pub fn recipe_request(style: &PromptStyle, ingredients: &[String]) -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user(format_recipe_prompt(style, ingredients))],
        max_tokens: Some(RECIPE_MAX_TOKENS),
        temperature: Some(style.temperature),
        top_p: Some(RECIPE_TOP_P),
        presence_penalty: Some(RECIPE_PRESENCE_PENALTY),
        frequency_penalty: Some(RECIPE_FREQUENCY_PENALTY),
    }
}
