//! Recipe text parsing.
//!
//! Turns free-text model output (e.g. "Recipe: Beet Salad\nRating: 8/10\nIngredients:\n- beets...")
//! into a [`StructuredRecipe`]. The model is never asked for a schema, so everything here is a
//! line-oriented heuristic over whatever shape the provider returns.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::types::{StructuredRecipe, DEFAULT_RATING, DEFAULT_SERVINGS, UNTITLED_RECIPE};

pub const INGREDIENTS_LABEL: &str = "Ingredients:";
pub const INSTRUCTIONS_LABEL: &str = "Instructions:";
pub const TIPS_LABEL: &str = "Tips and Variations:";

/// Section labels in the order the model is expected to emit them.
const SECTION_LABELS: [&str; 3] = [INGREDIENTS_LABEL, INSTRUCTIONS_LABEL, TIPS_LABEL];

/// Tips lines containing this are the closing summary paragraph, not tips.
const CLOSING_PARAGRAPH_MARKER: &str = "This recipe combines";

/// First line of the text, minus an optional "Recipe:" prefix.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Recipe:\s*)?([^\n]+)").expect("valid title regex"));

/// "Rating: 8/10", "Tastiness Rating: 7.5 / 10", etc. anywhere in the text.
static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Tastiness Rating:|Rating:|Taste Rating:)\s*([0-9]+(?:\.[0-9]+)?)\s*/\s*10")
        .expect("valid rating regex")
});

/// A single leading bullet: "*", "•" or "-".
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*•-]\s*").expect("valid bullet regex"));

/// A leading step number like "3. ".
static STEP_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").expect("valid step number regex"));

/// A leading step label like "Roast the beetroot: ".
static STEP_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:]+:\s*").expect("valid step label regex"));

/// Parse raw model output into a structured recipe.
///
/// Never fails: text with no recognizable structure still yields a recipe with a title,
/// the default rating and empty lists.
pub fn parse_recipe(raw: &str) -> StructuredRecipe {
    // Bold markers only; newlines carry the section structure.
    let text = raw.replace("**", "");
    let text = text.trim();

    let title = extract_title(text);
    let rating = extract_rating(text);
    let sections = split_sections(text);

    for warning in &sections.warnings {
        tracing::warn!(title = %title, "{}", warning);
    }

    StructuredRecipe {
        title,
        rating,
        servings: DEFAULT_SERVINGS.to_string(),
        ingredients: parse_ingredients(sections.ingredients),
        instructions: parse_instructions(sections.instructions),
        tips: parse_tips(sections.tips),
        generated_at: Utc::now(),
        error: None,
        warnings: sections.warnings,
    }
}

/// Parse raw response bytes.
///
/// Bytes that are not valid UTF-8 cannot be parsed as text and produce the parse-failure
/// record instead of a recipe.
pub fn parse_recipe_bytes(raw: &[u8]) -> StructuredRecipe {
    match std::str::from_utf8(raw) {
        Ok(text) => parse_recipe(text),
        Err(e) => {
            tracing::warn!(error = %e, "Recipe response is not valid UTF-8");
            StructuredRecipe::parse_failure(format!("Response is not valid UTF-8: {}", e))
        }
    }
}

fn extract_title(text: &str) -> String {
    TITLE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_RECIPE)
        .to_string()
}

fn extract_rating(text: &str) -> f64 {
    RATING_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_RATING)
}

/// Raw text of each section, plus anything odd noticed while locating them.
#[derive(Debug, Default)]
struct Sections<'a> {
    ingredients: &'a str,
    instructions: &'a str,
    tips: &'a str,
    warnings: Vec<String>,
}

/// Locate the three sections by the first exact occurrence of each label.
///
/// A section runs from the end of its label to the next label present later in
/// [`SECTION_LABELS`] order, or to the end of the text. Labels are assumed to appear in
/// that order; when they don't, the affected sections come out empty or overlong and a
/// warning is recorded rather than guessing at a different order.
fn split_sections(text: &str) -> Sections<'_> {
    let starts: Vec<Option<usize>> = SECTION_LABELS.iter().map(|l| text.find(l)).collect();

    let mut bodies = [""; 3];
    for (i, label) in SECTION_LABELS.iter().enumerate() {
        let Some(start) = starts[i] else {
            continue;
        };
        let body_start = start + label.len();
        let body_end = starts[i + 1..]
            .iter()
            .find_map(|s| *s)
            .unwrap_or(text.len());

        if body_end >= body_start {
            bodies[i] = text[body_start..body_end].trim();
        }
    }

    let mut warnings = Vec::new();
    let present: Vec<(&str, usize)> = SECTION_LABELS
        .iter()
        .zip(&starts)
        .filter_map(|(label, start)| start.map(|s| (*label, s)))
        .collect();
    for pair in present.windows(2) {
        let (first, first_at) = pair[0];
        let (second, second_at) = pair[1];
        if second_at < first_at {
            warnings.push(format!(
                "Section labels out of order: \"{}\" appears before \"{}\"",
                second, first
            ));
        }
    }

    Sections {
        ingredients: bodies[0],
        instructions: bodies[1],
        tips: bodies[2],
        warnings,
    }
}

/// Trimmed, non-empty lines of a section after `clean` has been applied to each.
fn section_lines<F>(section: &str, clean: F) -> impl Iterator<Item = String> + '_
where
    F: Fn(&str) -> String + 'static,
{
    section
        .split('\n')
        .map(str::trim)
        .map(clean)
        .filter(|line| !line.is_empty())
}

fn strip_bullet(line: &str) -> String {
    BULLET_RE.replace(line, "").into_owned()
}

fn parse_ingredients(section: &str) -> Vec<String> {
    section_lines(section, strip_bullet).collect()
}

fn parse_instructions(section: &str) -> Vec<String> {
    section_lines(section, |line| {
        let line = STEP_NUMBER_RE.replace(line, "");
        let line = BULLET_RE.replace(&line, "");
        STEP_LABEL_RE.replace(&line, "").into_owned()
    })
    .collect()
}

fn parse_tips(section: &str) -> Vec<String> {
    section_lines(section, strip_bullet)
        .filter(|line| !line.contains(CLOSING_PARAGRAPH_MARKER))
        .collect()
}
