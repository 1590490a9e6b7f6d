// src/scanner/mod.rs
// =============================================================================
// This module finds the embedded structured-data block in an HTML page.
//
// It does NOT parse HTML. It walks the raw bytes once with a tiny state
// machine looking for:
//   <script ...>  ...a marker ("schema" or "@type": "Recipe")...  </script
// and hands back whatever sits between the opening tag and the closing tag.
//
// Submodules:
// - prefix: the byte-wise "does this literal start here?" test
// - machine: the 4-state scanner itself
//
// Rust concepts:
// - Slices (&[u8]): read-only views into someone else's buffer
// - Range<usize>: a (start, end) pair of indices
// - thiserror: derive Display/Error for our error type
// =============================================================================

mod machine;
mod prefix;

use thiserror::Error;

pub use machine::{extract, extract_str, find};
pub use prefix::has_prefix;

// The one and only scanner failure.
//
// Covers "no <script tag", "opening tag never closed with >" and "no marker or
// no closing tag before the input ran out". Callers only ever need to know
// that the page has no usable embedded schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no embedded schema block found")]
pub struct NotFound;

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a unit struct for the error?
//    - NotFound carries no data, so `struct NotFound;` is enough
//    - It is Copy, so returning it costs nothing
//    - #[derive(Error)] from thiserror implements std::error::Error for us,
//      which lets anyhow's `?` wrap it later
//
// 2. Why return Result instead of Option?
//    - Result<_, NotFound> is #[must_use], so callers get a warning if they
//      forget to check it
//    - It also reads better at call sites: `scanner::extract(html)?`
// -----------------------------------------------------------------------------
