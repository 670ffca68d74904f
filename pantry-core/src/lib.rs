pub mod ai;
pub mod cache;
pub mod error;
pub mod generator;
pub mod parser;
pub mod types;

pub use cache::{CacheKey, CacheStats, RecipeCache};
pub use error::RecipeError;
pub use generator::{GeneratorOptions, RecipeGenerator};
pub use parser::{parse_recipe, parse_recipe_bytes};
pub use types::{ButtonState, StructuredRecipe, DEFAULT_RATING, DEFAULT_SERVINGS, UNTITLED_RECIPE};
