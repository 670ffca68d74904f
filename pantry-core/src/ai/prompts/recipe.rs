//! Recipe prompt catalog and the button-state rotation over it.
//!
//! Repeated "regenerate" clicks walk through four tonal variants of the same request,
//! so output varies between clicks but stays reproducible for a given button state.

use serde::Serialize;

use crate::types::ButtonState;

/// Prompt name for logging.
pub const RECIPE_PROMPT_NAME: &str = "recipe";

/// Placeholder replaced by the comma-joined ingredient list.
pub const INGREDIENTS_PLACEHOLDER: &str = "{ingredients}";

/// Tone of a recipe prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Standard,
    Fusion,
    Gourmet,
    Quick,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Standard => "standard",
            PromptType::Fusion => "fusion",
            PromptType::Gourmet => "gourmet",
            PromptType::Quick => "quick",
        }
    }
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the prompt catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptStyle {
    #[serde(rename = "type")]
    pub kind: PromptType,
    /// Template containing [`INGREDIENTS_PLACEHOLDER`] once.
    pub template: &'static str,
    /// Sampling temperature in [0, 1].
    pub temperature: f32,
}

static DEFAULT_STYLES: [PromptStyle; 4] = [
    PromptStyle {
        kind: PromptType::Standard,
        template: "Create a unique recipe using these ingredients: {ingredients}. Provide a catchy title, full ingredients list, and detailed instructions. Rate its tastiness from 1-10.",
        temperature: 0.7,
    },
    PromptStyle {
        kind: PromptType::Fusion,
        template: "Invent a fusion dish combining cuisines, using these ingredients: {ingredients}. Include a creative name, all ingredients needed, step-by-step guide, and taste rating (1-10).",
        temperature: 0.8,
    },
    PromptStyle {
        kind: PromptType::Gourmet,
        template: "Design a gourmet meal featuring these ingredients: {ingredients}. Give it an elegant name, list all components, provide a chef's guide to preparation, and rate its flavor profile (1-10).",
        temperature: 0.6,
    },
    PromptStyle {
        kind: PromptType::Quick,
        template: "Craft a quick and easy recipe with these items: {ingredients}. Choose a simple name, list ingredients with amounts, write clear instructions, and score its taste appeal (1-10).",
        temperature: 0.5,
    },
];

/// Ordered, immutable list of prompt styles.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    styles: &'static [PromptStyle],
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            styles: &DEFAULT_STYLES,
        }
    }
}

impl PromptCatalog {
    pub fn styles(&self) -> &[PromptStyle] {
        self.styles
    }

    /// Pick the style for a button state.
    ///
    /// Index is `floor(state / 2.5)` clamped to the last entry, so with four styles:
    /// 0-2 standard, 3-4 fusion, 5-7 gourmet, 8 and up quick.
    pub fn select(&self, state: ButtonState) -> &'static PromptStyle {
        let last = self.styles.len() - 1;
        // floor(n / 2.5) == floor(2n / 5)
        let index = (u64::from(state.get()) * 2 / 5).min(last as u64) as usize;
        &self.styles[index]
    }
}

/// Substitute the ingredient list into the style's template.
///
/// Ingredients are joined with ", " in the order given. An empty list joins to an empty
/// string; rejecting it is the caller's job.
pub fn format_recipe_prompt(style: &PromptStyle, ingredients: &[String]) -> String {
    style
        .template
        .replacen(INGREDIENTS_PLACEHOLDER, &ingredients.join(", "), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_for(state: u32) -> PromptType {
        PromptCatalog::default().select(ButtonState::new(state)).kind
    }

    #[test]
    fn test_select_rotation() {
        assert_eq!(kind_for(0), PromptType::Standard);
        assert_eq!(kind_for(1), PromptType::Standard);
        assert_eq!(kind_for(2), PromptType::Standard);
        assert_eq!(kind_for(3), PromptType::Fusion);
        assert_eq!(kind_for(4), PromptType::Fusion);
        assert_eq!(kind_for(5), PromptType::Gourmet);
        assert_eq!(kind_for(7), PromptType::Gourmet);
        assert_eq!(kind_for(8), PromptType::Quick);
        assert_eq!(kind_for(9), PromptType::Quick);
    }

    #[test]
    fn test_select_clamps_large_states() {
        assert_eq!(kind_for(10), PromptType::Quick);
        assert_eq!(kind_for(u32::MAX), PromptType::Quick);
    }

    #[test]
    fn test_catalog_order_and_temperatures() {
        let catalog = PromptCatalog::default();
        let kinds: Vec<_> = catalog.styles().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PromptType::Standard,
                PromptType::Fusion,
                PromptType::Gourmet,
                PromptType::Quick
            ]
        );
        for style in catalog.styles() {
            assert!((0.0..=1.0).contains(&style.temperature));
            assert_eq!(style.template.matches(INGREDIENTS_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn test_format_preserves_order() {
        let style = PromptCatalog::default().select(ButtonState::new(0));
        let prompt = format_recipe_prompt(
            style,
            &["tomato".to_string(), "basil".to_string(), "garlic".to_string()],
        );
        assert!(prompt.contains("these ingredients: tomato, basil, garlic."));
        assert!(!prompt.contains(INGREDIENTS_PLACEHOLDER));
    }

    #[test]
    fn test_format_empty_does_not_panic() {
        let style = PromptCatalog::default().select(ButtonState::new(8));
        let prompt = format_recipe_prompt(style, &[]);
        assert!(prompt.starts_with("Craft a quick and easy recipe with these items: ."));
    }

    #[test]
    fn test_selected_style_outlives_catalog() {
        let style = {
            let catalog = PromptCatalog::default();
            catalog.select(ButtonState::new(5))
        };
        assert_eq!(style.kind, PromptType::Gourmet);
    }
}
