use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Title used when the response has no usable first line.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Rating used when no "Rating: N/10" label is found.
pub const DEFAULT_RATING: f64 = 5.0;

/// The prompts never ask for a serving count, so every recipe gets this.
pub const DEFAULT_SERVINGS: &str = "4-6 servings";

/// Button presses wrap at this value on the client.
pub const BUTTON_STATE_WRAP: u32 = 10;

/// A recipe extracted from free-text model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecipe {
    pub title: String,
    pub rating: f64,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// Set only on the sentinel record returned when parsing fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Structural oddities noticed while parsing, e.g. section labels out of order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl StructuredRecipe {
    /// The record returned in place of a recipe when parsing fails.
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self {
            title: "Recipe Parser Error".to_string(),
            rating: DEFAULT_RATING,
            servings: DEFAULT_SERVINGS.to_string(),
            ingredients: Vec::new(),
            instructions: vec!["Error parsing recipe. Please try again.".to_string()],
            tips: Vec::new(),
            generated_at: Utc::now(),
            error: Some(message.into()),
            warnings: Vec::new(),
        }
    }

    /// True for the sentinel record produced by a failed parse.
    pub fn is_parse_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// How many times the user has asked for a recipe, as reported by the client.
///
/// Drives prompt-style rotation and is part of the cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ButtonState(u32);

impl ButtonState {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The state the client moves to after a generation.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % BUTTON_STATE_WRAP)
    }

    /// Validate an arbitrary JSON value as a button state.
    ///
    /// Accepts non-negative integers only, including floats with no fractional part.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, RecipeError> {
        if let Some(n) = value.as_u64() {
            return u32::try_from(n)
                .map(Self)
                .map_err(|_| invalid_button_state(value));
        }
        if let Some(n) = value.as_i64() {
            return Self::try_from(n);
        }
        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) => {
                Ok(Self(f as u32))
            }
            _ => Err(invalid_button_state(value)),
        }
    }
}

impl From<u32> for ButtonState {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for ButtonState {
    type Error = RecipeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| invalid_button_state(value))
    }
}

impl std::fmt::Display for ButtonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_button_state(value: impl std::fmt::Display) -> RecipeError {
    RecipeError::InvalidArgument(format!(
        "buttonState must be a non-negative integer, got {}",
        value
    ))
}
