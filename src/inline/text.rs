//! Plain text between inline matches, with hard line breaks.

use memchr::memchr_iter;

use crate::element::{Children, Element, Node};

/// Wrap `text` in an unnamed node, turning hard breaks into `<br />`.
///
/// A hard break is a newline preceded by two or more spaces, or by a
/// backslash. With `breaks` every newline is one.
pub(super) fn inline_text(text: &str, breaks: bool) -> Element {
    let mut children = Vec::new();
    let mut rest = text;
    while let Some((start, end)) = find_hard_break(rest, breaks) {
        children.push(Element::text(&rest[..start]));
        children.push(Node::named("br", Children::None).into());
        children.push(Element::text("\n"));
        rest = &rest[end..];
    }
    children.push(Element::text(rest));
    Node::unnamed(Children::Many(children)).into()
}

/// Span of the first hard break: trailing spaces, backslash and newline.
fn find_hard_break(text: &str, breaks: bool) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    for newline in memchr_iter(b'\n', bytes) {
        let spaces = trailing_spaces(&bytes[..newline]);
        if breaks || spaces >= 2 {
            return Some((newline - spaces, newline + 1));
        }
        if newline > 0 && bytes[newline - 1] == b'\\' {
            let spaces = trailing_spaces(&bytes[..newline - 1]);
            return Some((newline - 1 - spaces, newline + 1));
        }
    }
    None
}

#[inline]
fn trailing_spaces(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|&&b| b == b' ').count()
}
