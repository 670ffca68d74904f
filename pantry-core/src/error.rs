use thiserror::Error;

/// Failures surfaced by recipe generation.
///
/// Parse problems are not errors: they come back as a [`StructuredRecipe`](crate::StructuredRecipe)
/// with its `error` field set.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The language-model call failed. Provider detail is logged, not carried.
    #[error("Failed to generate recipe")]
    UpstreamUnavailable,
}
