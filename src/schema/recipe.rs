// src/schema/recipe.rs
// =============================================================================
// Turns the raw block handed back by the scanner into a Recipe JSON object.
//
// Sites publish their JSON-LD in two common shapes:
//   1. The Recipe object itself: {"@type": "Recipe", ...}
//   2. A graph of many objects:  {"@graph": [{...WebPage...}, {"@type": "Recipe", ...}]}
// For shape 2 we pick the first graph node whose @type is "Recipe".
// Anything else is not a recipe, even though it matched a scanner marker.
// =============================================================================

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    /// The extracted block is not valid JSON
    #[error("schema block is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The block is JSON but holds no Recipe object
    #[error("schema block contains no Recipe object")]
    MissingRecipe,
}

// Parses `block` as JSON and returns the Recipe object inside it.
//
// The Recipe is either the top-level object or the first Recipe node of its
// @graph array. Any other JSON-LD (BreadcrumbList, WebSite, ...) is
// MissingRecipe. Whether the Recipe is *complete* is checked separately.
pub fn parse_recipe(block: &str) -> Result<Value, RecipeError> {
    let schema: Value = serde_json::from_str(block)?;

    if let Some(graph) = schema.get("@graph").and_then(Value::as_array) {
        return graph
            .iter()
            .find(|node| is_recipe(node))
            .cloned()
            .ok_or(RecipeError::MissingRecipe);
    }

    if is_recipe(&schema) {
        Ok(schema)
    } else {
        Err(RecipeError::MissingRecipe)
    }
}

// "@type" is either "Recipe" or a list such as ["Recipe", "NewsArticle"]
fn is_recipe(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind.as_str() == Some("Recipe")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_recipe_object() {
        let recipe = parse_recipe(r#"{"@type": "Recipe", "name": "Naan"}"#).unwrap();
        assert_eq!(recipe, json!({"@type": "Recipe", "name": "Naan"}));
    }

    #[test]
    fn test_recipe_picked_from_graph() {
        let block = r#"{
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebPage", "name": "Home"},
                {"@type": "Recipe", "name": "Dal"},
                {"@type": "Recipe", "name": "Second"}
            ]
        }"#;
        let recipe = parse_recipe(block).unwrap();
        assert_eq!(recipe, json!({"@type": "Recipe", "name": "Dal"}));
    }

    #[test]
    fn test_graph_without_recipe() {
        let block = r#"{"@graph": [{"@type": "WebPage"}, {"@type": "Person"}]}"#;
        assert!(matches!(parse_recipe(block), Err(RecipeError::MissingRecipe)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_recipe(" burn the naan schema"),
            Err(RecipeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_other_json_ld_types_are_not_recipes() {
        let breadcrumbs = r#"{"@context": "https://schema.org", "@type": "BreadcrumbList", "itemListElement": []}"#;
        assert!(matches!(parse_recipe(breadcrumbs), Err(RecipeError::MissingRecipe)));
        assert!(matches!(parse_recipe(r#"{"@graph": "nope"}"#), Err(RecipeError::MissingRecipe)));
        assert!(matches!(parse_recipe("[1, 2]"), Err(RecipeError::MissingRecipe)));
    }

    #[test]
    fn test_type_list_containing_recipe() {
        let recipe = parse_recipe(r#"{"@type": ["Recipe", "NewsArticle"], "name": "Dal"}"#).unwrap();
        assert_eq!(recipe["name"], "Dal");
    }
}
