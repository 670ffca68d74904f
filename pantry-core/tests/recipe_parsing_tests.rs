//! Golden file tests for model response parsing.
//!
//! Each case in `fixtures/recipe_parsing/` pairs a raw model response with the recipe
//! it should parse to.
//!
//! Test format:
//! ```json
//! {
//!   "raw": "Recipe: Beet Salad\nRating: 8/10\nIngredients:\n- beets",
//!   "expected": { "title": "Beet Salad", "rating": 8.0, "ingredients": ["beets"], ... }
//! }
//! ```

use glob::glob;
use pantry_core::{parse_recipe, DEFAULT_SERVINGS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    /// Raw model response
    raw: String,
    /// Expected output from parsing
    expected: Expected,
}

/// Expected output from parsing (everything but the timestamp)
#[derive(Debug, Deserialize, PartialEq)]
struct Expected {
    title: String,
    rating: f64,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    tips: Vec<String>,
    #[serde(default)]
    warnings: usize,
}

fn fixture_paths() -> Vec<PathBuf> {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/recipe_parsing/*.json")
        .to_string_lossy()
        .into_owned();

    let paths: Vec<PathBuf> = glob(&pattern)
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .collect();

    assert!(!paths.is_empty(), "No test fixtures found for {}", pattern);
    paths
}

fn load_case(path: &Path) -> TestCase {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

#[test]
fn test_recipe_parsing_fixtures() {
    let mut failures = Vec::new();

    for path in fixture_paths() {
        let case = load_case(&path);
        let recipe = parse_recipe(&case.raw);

        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert!(recipe.error.is_none());

        let actual = Expected {
            title: recipe.title,
            rating: recipe.rating,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            tips: recipe.tips,
            warnings: recipe.warnings.len(),
        };

        if actual != case.expected {
            failures.push(format!(
                "{}:\n  expected: {:?}\n  actual:   {:?}",
                path.display(),
                case.expected,
                actual
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} fixture(s) failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_parser_is_total() {
    let inputs = [
        "",
        "\n\n\n",
        "********",
        "Ingredients:",
        "Instructions:Tips and Variations:Ingredients:",
        "Rating: /10",
        "•",
        "Recipe:",
        "日本のカレー\nIngredients:\n• ルー",
    ];

    for raw in inputs {
        let recipe = parse_recipe(raw);
        assert!(!recipe.title.is_empty(), "empty title for {:?}", raw);
        assert!(recipe.rating.is_finite());
        assert!(recipe.error.is_none());
    }
}
