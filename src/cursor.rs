//! Byte cursor for recognizer scanning.
//!
//! Recognizers only ever stop on ASCII delimiters or at the end of the
//! text, so every offset a cursor reports is a valid `str` boundary.

use memchr::memchr;

/// A cursor for byte-by-byte scanning over UTF-8 text.
///
/// # Example
/// ```
/// use blockdown::cursor::Cursor;
///
/// let mut cursor = Cursor::new("<a href>");
/// assert!(cursor.eat(b'<'));
/// assert_eq!(cursor.skip_while(|b| b.is_ascii_alphabetic()), 1);
/// assert_eq!(cursor.find(b'>'), Some(7));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor over a text.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Create a cursor starting at an offset.
    #[inline]
    pub fn new_at(text: &'a str, offset: usize) -> Self {
        debug_assert!(offset <= text.len());
        Self { text, pos: offset }
    }

    /// Current offset from the start of the text.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.text.len() - self.pos
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Advance by n bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Advance by 1 byte.
    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Check if the current position matches a byte.
    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an ASCII prefix, ignoring case.
    #[inline]
    pub fn eat_ignore_case(&mut self, prefix: &str) -> bool {
        let rest = &self.text.as_bytes()[self.pos..];
        if rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes()) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Skip while predicate is true; returns the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip spaces only.
    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|b| b == b' ')
    }

    /// Skip ASCII whitespace (space, tab, newline, CR, form feed, vertical tab).
    #[inline]
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(is_space)
    }

    /// Offset of the next occurrence of `b` at or after the cursor.
    #[inline]
    pub fn find(&self, b: u8) -> Option<usize> {
        memchr(b, &self.text.as_bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Text between two offsets.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }
}

/// ASCII whitespace as matched by `\s` in byte-oriented patterns.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Word character (`\w`) over a full `char`.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// ASCII word byte (`[A-Za-z0-9_]`).
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}
