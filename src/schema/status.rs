// src/schema/status.rs
// =============================================================================
// What happened to each page we looked at.
//
// The scanner only knows "found" or "not found". This file adds the outer
// causes around it (the page never loaded, the block was not JSON, ...) so a
// report can say *why* a page has no recipe.
//
// Rust concepts:
// - serde derive: the same structs print as a table or as JSON
// - #[serde(skip_serializing_if)]: leave empty fields out of the JSON
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    /// A complete Recipe was found in the page
    Extracted,
    /// The page could not be read or downloaded
    DownloadFailed,
    /// No <script> block with a schema marker, or the block holds no Recipe
    ExtractionFailed,
    /// The block was found but is not valid JSON
    ParsingFailed,
    /// A Recipe was found but lacks a name, description, ingredients or instructions
    IncompleteRecipe,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Extracted => "extracted",
            PageStatus::DownloadFailed => "download_failed",
            PageStatus::ExtractionFailed => "extraction_failed",
            PageStatus::ParsingFailed => "parsing_failed",
            PageStatus::IncompleteRecipe => "incomplete_recipe",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// The outcome of processing one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// Where the page came from (file path, URL or "-")
    pub source: String,
    pub status: PageStatus,
    /// Byte offsets of the block inside the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<(usize, usize)>,
    /// The raw block text as the scanner found it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// The selected Recipe object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Value>,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PageReport {
    pub fn failed(source: impl Into<String>, status: PageStatus, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status,
            window: None,
            schema: None,
            recipe: None,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == PageStatus::Extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&PageStatus::IncompleteRecipe).unwrap();
        assert_eq!(json, "\"incomplete_recipe\"");
        assert_eq!(PageStatus::DownloadFailed.to_string(), "download_failed");
    }

    #[test]
    fn test_failed_report_skips_empty_fields() {
        let report = PageReport::failed("page.html", PageStatus::ExtractionFailed, "no block");
        assert!(!report.is_ok());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "extraction_failed");
        assert!(json.get("schema").is_none());
        assert!(json.get("window").is_none());
    }
}
