//! Code spans.
//!
//! The closer is the first backtick run with exactly the opener's length.
//! Spaces next to either delimiter are dropped.

use memchr::memchr;

use super::{Excerpt, Inline};
use crate::element::{Children, Node};
use crate::limits::MAX_CODE_SPAN_BACKTICKS;

pub(super) fn code(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    let bytes = text.as_bytes();

    let opener = run_len(bytes, 0, b'`');
    if opener > MAX_CODE_SPAN_BACKTICKS {
        log::debug!("backtick run of {opener} exceeds code span limit");
        return None;
    }
    let content_start = opener + run_len(bytes, opener, b' ');

    let mut pos = content_start + 1;
    while pos < bytes.len() {
        let closer = pos + memchr(b'`', &bytes[pos..])?;
        let len = run_len(bytes, closer, b'`');
        if bytes[closer - 1] != b'`' && len == opener {
            let trailing = bytes[content_start..closer].iter().rev().take_while(|&&b| b == b' ').count();
            let content_end = (closer - trailing).max(content_start + 1);
            let content = collapse_newlines(&text[content_start..content_end]);
            return Some(Inline::new(closer + opener, Node::named("code", Children::Text(content))));
        }
        pos = closer + len;
    }
    None
}

#[inline]
fn run_len(bytes: &[u8], from: usize, b: u8) -> usize {
    bytes[from..].iter().take_while(|&&c| c == b).count()
}

/// Replace each newline, and the spaces before it, with one space.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pieces = text.split('\n').peekable();
    while let Some(piece) = pieces.next() {
        if pieces.peek().is_some() {
            out.push_str(piece.trim_end_matches(' '));
            out.push(' ');
        } else {
            out.push_str(piece);
        }
    }
    out
}
