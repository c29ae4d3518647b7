//! Resource guards.
//!
//! Bounds on nested re-parses and on how far recognizers scan, so
//! hostile input cannot make a parse quadratic or recurse without end.

/// Maximum nesting depth for block re-parses (quotes, list items).
pub const MAX_BLOCK_NESTING: usize = 32;

/// Maximum nesting depth for inline re-parses (emphasis, links, strikethrough).
pub const MAX_INLINE_NESTING: usize = 32;

/// Maximum backtick run length for code spans.
/// Longer runs are treated as literal text.
pub const MAX_CODE_SPAN_BACKTICKS: usize = 32;

/// Maximum digits in an ordered list marker.
pub const MAX_LIST_MARKER_DIGITS: usize = 9;

/// How far past an emphasis or strikethrough opener a closer is searched for.
pub const MAX_INLINE_SCAN: usize = 64 * 1024;

/// Maximum table columns.
pub const MAX_TABLE_COLUMNS: usize = 128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_cover_ordinary_documents() {
        const { assert!(MAX_BLOCK_NESTING >= 16 && MAX_INLINE_NESTING >= 16) };
        const { assert!(MAX_LIST_MARKER_DIGITS == 9) };
        const { assert!(MAX_TABLE_COLUMNS >= 64) };
        const { assert!(MAX_INLINE_SCAN >= 4096 && MAX_CODE_SPAN_BACKTICKS >= 16) };
    }
}
