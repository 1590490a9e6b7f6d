// src/schema/mod.rs
// =============================================================================
// This module is the consumer side of the scanner.
//
// Per page:
// 1. Run the scanner over the raw HTML bytes
// 2. Parse the block as JSON and pick out the Recipe
// 3. Check the Recipe has the fields we need
// 4. Record the outcome as a PageReport
//
// Submodules:
// - fields: accessors for name / description / ingredients / instructions
// - recipe: JSON parsing and @graph handling
// - status: PageStatus / PageReport
// =============================================================================

mod fields;
mod recipe;
mod status;

pub use fields::{description, ingredients, instructions, missing_fields, title};
pub use recipe::{parse_recipe, RecipeError};
pub use status::{PageReport, PageStatus};

use tracing::debug;

use crate::scanner;

// Processes one page that was already loaded.
#[tracing::instrument(skip(html), fields(bytes = html.len()))]
pub fn process_document(source: &str, html: &[u8]) -> PageReport {
    let window = match scanner::find(html) {
        Ok(window) => window,
        Err(err) => {
            debug!("scanner gave up: {}", err);
            return PageReport::failed(source, PageStatus::ExtractionFailed, err.to_string());
        }
    };

    let block = String::from_utf8_lossy(&html[window.clone()]).into_owned();
    debug!(start = window.start, end = window.end, "found schema block");

    let (status, recipe, message) = match parse_recipe(&block) {
        Ok(recipe) => {
            let missing = missing_fields(&recipe);
            if missing.is_empty() {
                (PageStatus::Extracted, Some(recipe), None)
            } else {
                let message = format!("recipe is missing: {}", missing.join(", "));
                (PageStatus::IncompleteRecipe, Some(recipe), Some(message))
            }
        }
        Err(err @ RecipeError::InvalidJson(_)) => (PageStatus::ParsingFailed, None, Some(err.to_string())),
        // The marker matched, but the block is some other kind of JSON-LD
        Err(err @ RecipeError::MissingRecipe) => (PageStatus::ExtractionFailed, None, Some(err.to_string())),
    };

    PageReport {
        source: source.to_string(),
        status,
        window: Some((window.start, window.end)),
        schema: Some(block),
        recipe,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAAN: &str = r#"{"@context": "https://schema.org", "@type": "Recipe", "name": "Naan", "description": "Flatbread", "recipeIngredient": ["flour", "yoghurt"], "recipeInstructions": [{"@type": "HowToStep", "text": "Bake."}]}"#;

    #[test]
    fn test_recipe_page() {
        let html = format!(
            r#"<html><head>
            <script src="app.js"></script>
            <script type="application/ld+json">{}</script>
        </head></html>"#,
            NAAN
        );
        let report = process_document("naan.html", html.as_bytes());
        assert_eq!(report.status, PageStatus::Extracted);
        assert!(report.is_ok());
        assert_eq!(report.recipe.unwrap()["name"], "Naan");
    }

    #[test]
    fn test_page_without_block() {
        let report = process_document("empty.html", b"<p>no scripts</p>");
        assert_eq!(report.status, PageStatus::ExtractionFailed);
        assert!(report.schema.is_none());
    }

    #[test]
    fn test_block_is_not_json() {
        let report = process_document("naan.html", b"<script> burn the naan schema</script>");
        assert_eq!(report.status, PageStatus::ParsingFailed);
        assert_eq!(report.schema.as_deref(), Some(" burn the naan schema"));
        assert_eq!(report.window, Some((8, 29)));
    }

    #[test]
    fn test_breadcrumb_block_is_not_a_recipe() {
        let html = br#"<script type="application/ld+json">{"@context": "https://schema.org", "@type": "BreadcrumbList", "itemListElement": []}</script>"#;
        let report = process_document("crumbs.html", html);
        assert_eq!(report.status, PageStatus::ExtractionFailed);
        assert!(!report.is_ok());
        assert!(report.recipe.is_none());
    }

    #[test]
    fn test_graph_without_recipe() {
        let html = br#"<script>{"@context": "https://schema.org", "@graph": [{"@type": "WebSite"}]}</script>"#;
        let report = process_document("site.html", html);
        assert_eq!(report.status, PageStatus::ExtractionFailed);
        assert!(report.recipe.is_none());
    }

    #[test]
    fn test_recipe_with_only_a_name() {
        let report = process_document("naan.html", br#"<script>{"@type": "Recipe", "name": "Naan"}</script>"#);
        assert_eq!(report.status, PageStatus::IncompleteRecipe);
        assert!(!report.is_ok());
        assert_eq!(report.recipe.as_ref().unwrap()["name"], "Naan");
        assert_eq!(
            report.message.as_deref(),
            Some("recipe is missing: description, recipeIngredient, recipeInstructions")
        );
    }
}
