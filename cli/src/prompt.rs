use anyhow::Result;
use pantry_core::ai::prompts::{format_recipe_prompt, PromptCatalog};
use pantry_core::ButtonState;
use serde::Serialize;

#[derive(Serialize)]
struct PromptPreview<'a> {
    style: &'a str,
    temperature: f32,
    prompt: String,
}

/// Show which prompt a button state selects and the exact text that would be sent.
pub fn preview_prompt(button_state: u32, ingredients: &[String]) -> Result<()> {
    let catalog = PromptCatalog::default();
    let style = catalog.select(ButtonState::new(button_state));

    let preview = PromptPreview {
        style: style.kind.as_str(),
        temperature: style.temperature,
        prompt: format_recipe_prompt(style, ingredients),
    };
    println!("{}", serde_json::to_string_pretty(&preview)?);

    Ok(())
}
