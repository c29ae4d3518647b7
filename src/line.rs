//! Line preprocessing: blank detection, tab expansion and indentation.

use std::borrow::Cow;

/// One physical line after tab expansion.
///
/// `body` keeps the leading spaces; `text()` is the body without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub body: Cow<'a, str>,
    pub indent: usize,
}

impl<'a> Line<'a> {
    /// Expand tabs and measure indentation.
    ///
    /// Returns `None` for blank lines.
    pub fn new(raw: &'a str) -> Option<Self> {
        if is_blank(raw) {
            return None;
        }
        let body = expand_tabs(raw);
        let indent = body.bytes().take_while(|&b| b == b' ').count();
        Some(Self { body, indent })
    }

    /// Body with leading spaces removed. Never empty.
    #[inline]
    pub fn text(&self) -> &str {
        &self.body[self.indent..]
    }

    /// First byte of `text()`, the block marker.
    #[inline]
    pub fn marker(&self) -> u8 {
        self.text().as_bytes().first().copied().unwrap_or(b' ')
    }
}

/// A line counts as blank when nothing but trailing whitespace remains.
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0b))
}

/// Trim the bytes [`is_blank`] treats as whitespace from both ends.
#[inline]
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0b'))
}

/// Replace each tab with spaces up to the next multiple-of-4 column.
///
/// Columns are counted in chars, not bytes.
pub fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + 8);
    let mut column = 0usize;
    for ch in line.chars() {
        if ch == '\t' {
            let shortage = 4 - column % 4;
            out.extend(std::iter::repeat_n(' ', shortage));
            column += shortage;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    Cow::Owned(out)
}

/// Standardize line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank("   \t  "));
        assert!(!is_blank("  a"));
        assert!(Line::new(" \t ").is_none());
    }

    #[test]
    fn test_tab_expansion() {
        assert_eq!(expand_tabs("\tx"), "    x");
        assert_eq!(expand_tabs("ab\tx"), "ab  x");
        assert_eq!(expand_tabs("abcd\tx"), "abcd    x");
        // Column is counted in chars, so a two-byte char takes one column.
        assert_eq!(expand_tabs("é\tx"), "é   x");
    }

    #[test]
    fn test_indent_and_text() {
        let line = Line::new("  \t- item").unwrap();
        assert_eq!(line.indent, 4);
        assert_eq!(line.text(), "- item");
        assert_eq!(line.marker(), b'-');
    }

    #[test]
    fn test_trim_blank_keeps_form_feed() {
        assert_eq!(trim_blank(" \ta b\0 "), "a b");
        assert_eq!(trim_blank("\x0ca"), "\x0ca");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
    }
}
