//! AI prompt templates.

pub mod recipe;

pub use recipe::{
    format_recipe_prompt, PromptCatalog, PromptStyle, PromptType, INGREDIENTS_PLACEHOLDER,
    RECIPE_PROMPT_NAME,
};
