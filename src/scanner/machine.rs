// src/scanner/machine.rs
// =============================================================================
// The single-pass scanner that locates an embedded schema block.
//
// States:
//   FindOpenTag   - look for `<script`, then skip attributes up to `>`
//   FindMarker    - look for `</script` (no marker here, go back to
//                   FindOpenTag) or a marker (`schema` / `"@type": "Recipe"`)
//   FindCloseTag  - look for `</script`; the block ends right before it
//   Done          - the match window is known
//
// Every state only moves the cursor forward, so one call touches each input
// byte a bounded number of times no matter how many <script> blocks a page has.
//
// Rust concepts:
// - Enums with data: each state carries what it has learned so far
// - Borrowing: the scanner holds &[u8], it never owns or copies the page
// - Result + ?: every "input ran out" path collapses into NotFound
// =============================================================================

use std::ops::Range;

use super::prefix::has_prefix;
use super::NotFound;

const SCRIPT_OPEN: &[u8] = b"<script";
const SCRIPT_CLOSE: &[u8] = b"</script";

// Cheap hints that a script block holds structured recipe data.
const MARKERS: [&[u8]; 2] = [b"schema", br#""@type": "Recipe""#];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FindOpenTag,
    FindMarker { start: usize },
    FindCloseTag { start: usize },
    Done { start: usize, end: usize },
}

// What FindMarker ran into first
enum Hit {
    CloseTag,
    Marker,
}

struct Scanner<'a> {
    input: &'a [u8],
    cursor: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, cursor: 0 }
    }

    fn exhausted(&self) -> bool {
        self.cursor >= self.input.len()
    }

    // Moves the cursor forward until `needle` starts at it.
    fn seek(&mut self, needle: &[u8]) -> Result<(), NotFound> {
        while !has_prefix(self.input, self.cursor, needle) {
            if self.exhausted() {
                return Err(NotFound);
            }
            self.cursor += 1;
        }
        Ok(())
    }

    fn step(&mut self, state: State) -> Result<State, NotFound> {
        match state {
            State::FindOpenTag => {
                let start = self.find_open_tag()?;
                Ok(State::FindMarker { start })
            }
            State::FindMarker { start } => match self.find_marker()? {
                Hit::CloseTag => {
                    // "</script" can never contain "<script", skip past it
                    self.cursor += SCRIPT_CLOSE.len();
                    Ok(State::FindOpenTag)
                }
                Hit::Marker => Ok(State::FindCloseTag { start }),
            },
            State::FindCloseTag { start } => {
                self.seek(SCRIPT_CLOSE)?;
                Ok(State::Done {
                    start,
                    end: self.cursor,
                })
            }
            State::Done { .. } => Ok(state),
        }
    }

    // Returns the index of the first content byte after `<script ...>`.
    fn find_open_tag(&mut self) -> Result<usize, NotFound> {
        self.seek(SCRIPT_OPEN)?;
        self.cursor += SCRIPT_OPEN.len();

        // Skip attributes such as src='...'
        loop {
            match self.input.get(self.cursor) {
                Some(b'>') => break,
                Some(_) => self.cursor += 1,
                None => return Err(NotFound),
            }
        }
        self.cursor += 1;

        Ok(self.cursor)
    }

    // Leaves the cursor on whatever was hit. The closing tag wins a tie
    // because no marker starts with '<'.
    fn find_marker(&mut self) -> Result<Hit, NotFound> {
        loop {
            if has_prefix(self.input, self.cursor, SCRIPT_CLOSE) {
                return Ok(Hit::CloseTag);
            }
            if MARKERS
                .iter()
                .any(|marker| has_prefix(self.input, self.cursor, marker))
            {
                return Ok(Hit::Marker);
            }
            if self.exhausted() {
                return Err(NotFound);
            }
            self.cursor += 1;
        }
    }
}

// Runs the state machine over `input` and returns the match window: the
// content between the end of the first qualifying `<script ...>` tag and the
// `<` of its `</script`. Allocates nothing.
pub fn find(input: &[u8]) -> Result<Range<usize>, NotFound> {
    let mut scanner = Scanner::new(input);
    let mut state = State::FindOpenTag;

    loop {
        state = scanner.step(state)?;

        if let State::Done { start, end } = state {
            debug_assert!(start <= end && end <= input.len());
            return Ok(start..end);
        }
    }
}

// Like `find`, but returns an owned copy of the block that outlives `input`.
pub fn extract(input: &[u8]) -> Result<Vec<u8>, NotFound> {
    let window = find(input)?;
    Ok(input[window].to_vec())
}

// UTF-8 flavour of `extract`. Both ends of the window sit next to ASCII
// bytes ('>' and '<'), so slicing a &str there is always on a char boundary.
pub fn extract_str(input: &str) -> Result<String, NotFound> {
    let window = find(input.as_bytes())?;
    Ok(input[window].to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `self.input.get(self.cursor)` instead of `self.input[self.cursor]`?
//    - Indexing with [] panics when the index is out of bounds
//    - .get() returns Option<&u8>, so running off the end is just `None`
//    - That turns "malformed tag" into a normal NotFound instead of a crash
//
// 2. What is `br#"..."#`?
//    - `b"..."` is a byte string literal (&[u8; N])
//    - `r#"..."#` is a raw string, so the inner quotes need no escaping
//    - Together: the bytes of "@type": "Recipe" exactly as written
//
// 3. Why does State::Done carry `end` as exclusive?
//    - Range<usize> (start..end) excludes `end`, which is the `<` of
//      `</script`, so input[start..end] is exactly the block content
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_block() {
        let result = extract_str("<script> burn the naan schema</script>");
        assert_eq!(result, Ok(" burn the naan schema".to_string()));
    }

    #[test]
    fn test_attributes_are_skipped() {
        let result = extract_str("<script src='x'>content with schema here</script>");
        assert_eq!(result, Ok("content with schema here".to_string()));
    }

    #[test]
    fn test_no_script_tag() {
        assert_eq!(find(b""), Err(NotFound));
        assert_eq!(find(b"bruh"), Err(NotFound));
        assert_eq!(find(b"<p>schema</p>"), Err(NotFound));
    }

    #[test]
    fn test_open_tag_never_closed() {
        assert_eq!(find(b"aijisj\n<script src='bruh'xyz"), Err(NotFound));
        assert_eq!(find(b"<script"), Err(NotFound));
    }

    #[test]
    fn test_skips_blocks_without_marker() {
        let html = "<script>var a = 1;</script><p>hi</p><script type=\"application/ld+json\">{\"@context\": \"https://schema.org\"}</script>";
        let result = extract_str(html);
        assert_eq!(result, Ok("{\"@context\": \"https://schema.org\"}".to_string()));
    }

    #[test]
    fn test_type_recipe_marker() {
        let html = r#"<script>{"@type": "Recipe", "name": "Naan"}</script>"#;
        let result = extract_str(html);
        assert_eq!(result, Ok(r#"{"@type": "Recipe", "name": "Naan"}"#.to_string()));
    }

    #[test]
    fn test_marker_outside_any_block_is_ignored() {
        let html = "<script>a</script> schema <script>b</script>";
        assert_eq!(find(html.as_bytes()), Err(NotFound));
    }

    #[test]
    fn test_marker_without_closing_tag() {
        assert_eq!(find(b"<script>text schema"), Err(NotFound));
        assert_eq!(find(b"<script>text schema</scrip"), Err(NotFound));
    }

    #[test]
    fn test_marker_cut_off_by_end_of_input() {
        assert_eq!(find(b"<script>text sche"), Err(NotFound));
    }

    #[test]
    fn test_window_bounds() {
        let html = b"xx<script>schema</script>";
        let window = find(html).unwrap();
        assert_eq!(window, 10..16);
        assert_eq!(&html[window], b"schema");
    }

    #[test]
    fn test_first_qualifying_block_wins() {
        let html = "<script>first schema</script><script>second schema</script>";
        assert_eq!(extract_str(html), Ok("first schema".to_string()));
    }

    #[test]
    fn test_tag_name_is_case_sensitive() {
        assert_eq!(find(b"<SCRIPT>schema</SCRIPT>"), Err(NotFound));
    }

    #[test]
    fn test_non_utf8_and_nul_bytes() {
        let html = b"\xff\x00<script>\x00schema\xfe</script>";
        assert_eq!(extract(html), Ok(b"\x00schema\xfe".to_vec()));
    }

    #[test]
    fn test_multibyte_text_around_block() {
        let html = "<p>crème brûlée</p><script>schéma schema ü</script>";
        assert_eq!(extract_str(html), Ok("schéma schema ü".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let html = b"<script>a</script><script id='ld'>{\"@type\": \"Recipe\"}</script>";
        let first = extract(html);
        let second = extract(html);
        assert!(first.is_ok());
        assert_eq!(first, second);
    }

    #[test]
    fn test_many_blocks_without_marker() {
        let mut html = "<script>var x = 1;</script>".repeat(10_000);
        html.push_str("<script>schema</script>");
        assert_eq!(extract_str(&html), Ok("schema".to_string()));
    }

    #[test]
    fn test_step_transitions() {
        let html = b"<script>a</script><script>schema</script>";
        let mut scanner = Scanner::new(html);

        let state = scanner.step(State::FindOpenTag).unwrap();
        assert_eq!(state, State::FindMarker { start: 8 });

        let state = scanner.step(state).unwrap();
        assert_eq!(state, State::FindOpenTag);
        assert_eq!(scanner.cursor, 9 + SCRIPT_CLOSE.len());

        let state = scanner.step(state).unwrap();
        assert_eq!(state, State::FindMarker { start: 26 });

        let state = scanner.step(state).unwrap();
        assert_eq!(state, State::FindCloseTag { start: 26 });
        assert_eq!(scanner.cursor, 26);

        let state = scanner.step(state).unwrap();
        assert_eq!(state, State::Done { start: 26, end: 32 });
    }
}
