// src/scanner/prefix.rs
// =============================================================================
// The prefix test every scanner state is built on.
//
// "Does `needle` occur starting exactly at `cursor` in `haystack`?"
//
// The haystack is a length-bounded slice, so running off its end is the same
// as hitting a terminator: the test simply fails.
// =============================================================================

// Returns true iff every byte of `needle` matches `haystack` starting at
// `cursor`. A cursor at or past the end, or a needle that would run past the
// end, is a miss. Never panics.
pub fn has_prefix(haystack: &[u8], cursor: usize, needle: &[u8]) -> bool {
    haystack
        .get(cursor..)
        .is_some_and(|rest| rest.starts_with(needle))
}
