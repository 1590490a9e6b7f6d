// src/schema/fields.rs
// =============================================================================
// Reads the fields a recipe needs before anyone downstream can use it.
//
// A Recipe object is only complete when it has:
// - a title        ("name")
// - a description  ("description")
// - ingredients    ("recipeIngredient", an array of strings)
// - instructions   ("recipeInstructions", strings or HowToStep objects)
//
// Rust concepts:
// - Option chaining: .get() -> .and_then() -> .map() never panics on odd JSON
// - collect::<Option<Vec<_>>>(): one bad entry turns the whole list into None
// =============================================================================

use serde_json::Value;

pub fn title(v: &Value) -> Option<String> {
    v.get("name")
        .and_then(|v| v.as_str())
        .map(|v| v.to_owned())
}

pub fn description(v: &Value) -> Option<String> {
    v.get("description")
        .and_then(|v| v.as_str())
        .map(|v| v.to_owned())
}

pub fn ingredients(v: &Value) -> Vec<String> {
    v.get("recipeIngredient")
        .and_then(|v| v.as_array())
        .and_then(|v| {
            v.iter()
                .map(|v| v.as_str().map(|v| v.to_owned()))
                .collect::<Option<Vec<String>>>()
        })
        .unwrap_or_default()
}

// Instructions come either as plain strings or as {"@type": "HowToStep", "text": ...}
pub fn instructions(v: &Value) -> Vec<String> {
    v.get("recipeInstructions")
        .and_then(|v| v.as_array())
        .and_then(|v| {
            v.iter()
                .map(|v| {
                    v.as_str()
                        .map(|v| v.to_owned())
                        .or_else(|| v.get("text").and_then(|v| v.as_str()).map(|v| v.to_owned()))
                })
                .collect::<Option<Vec<String>>>()
        })
        .unwrap_or_default()
}

// Names of the required fields the recipe lacks, in a fixed order.
// Empty means the recipe is complete.
pub fn missing_fields(recipe: &Value) -> Vec<&'static str> {
    let mut missing = Vec::new();

    if title(recipe).is_none() {
        missing.push("name");
    }
    if description(recipe).is_none() {
        missing.push("description");
    }
    if ingredients(recipe).is_empty() {
        missing.push("recipeIngredient");
    }
    if instructions(recipe).is_empty() {
        missing.push("recipeInstructions");
    }

    missing
}
