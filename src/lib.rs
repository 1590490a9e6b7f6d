// src/lib.rs
// =============================================================================
// Library half of schema-extractor.
//
// The binary (src/main.rs) is a thin shell around these modules; keeping
// them in a library lets other programs call the scanner directly.
//
// Modules:
// - scanner: finds the embedded schema block in raw HTML bytes
// - schema: parses the block and decides the per-page outcome
// - source: loads pages from files, stdin or URLs
// =============================================================================

pub mod scanner;
pub mod schema;
pub mod source;
