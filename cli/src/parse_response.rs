use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a saved model response into a structured recipe.
/// Outputs the recipe as JSON to stdout; a parse failure still prints, with a non-zero exit.
pub fn parse_response(file: &Path) -> Result<()> {
    let raw = fs::read(file)
        .with_context(|| format!("Failed to read response file: {}", file.display()))?;

    let recipe = pantry_core::parse_recipe_bytes(&raw);
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    match &recipe.error {
        // Return error so exit code is non-zero
        Some(e) => Err(anyhow::anyhow!("Failed to parse recipe: {}", e)),
        None => Ok(()),
    }
}
