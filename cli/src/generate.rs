use anyhow::{Context, Result};
use pantry_core::{ButtonState, RecipeGenerator};

/// Generate a recipe using the provider configured in the environment.
pub async fn generate(button_state: u32, ingredients: &[String]) -> Result<()> {
    let generator = RecipeGenerator::from_env().context("Failed to configure recipe generator")?;

    let recipe = generator
        .generate(ingredients, ButtonState::new(button_state))
        .await?;

    println!("{}", serde_json::to_string_pretty(&recipe)?);
    eprintln!(
        "Next button state: {}",
        ButtonState::new(button_state).next()
    );

    Ok(())
}
