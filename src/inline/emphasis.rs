//! Emphasis and strong emphasis.
//!
//! A span is scanned left to right in units. Before each unit after the
//! first, the scanner checks whether the closer starts here; the first
//! closer wins. A backslash-escaped marker is preferably one unit, and a
//! nested marker pair is consumed whole:
//!
//! - strong: `\m`, any non-marker byte, or `m…m` (up to the next marker);
//! - em `*`: `\*`, any non-`*` byte, or `**…**` (non-empty);
//! - em `_`: `\_`, any non-`_` byte, or `__…__`.
//!
//! A strong closer is `mm` not followed by `m`. An em closer is `m` not
//! followed by `m`; for `_` the next char must also not be a word char,
//! which keeps `snake_case_word` plain.
//!
//! When the span does not close that way and contains an escaped marker,
//! the scan is retried with each such backslash also allowed to stand
//! alone, so `*a\*` closes on its last `*`. The retry visits each offset
//! at most once.

use memchr::memchr;

use super::{Excerpt, Inline};
use crate::cursor::is_word_char;
use crate::element::Node;
use crate::limits::MAX_INLINE_SCAN;

pub(super) fn emphasis(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let marker = bytes[0];

    if bytes[1] == marker {
        if let Some(end) = scan(text, marker, Kind::Strong) {
            return Some(Inline::new(end + 2, Node::inline("strong", &text[2..end])));
        }
    }
    let end = scan(text, marker, Kind::Em)?;
    Some(Inline::new(end + 1, Node::inline("em", &text[1..end])))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Strong,
    Em,
}

impl Kind {
    #[inline]
    fn opener_len(self) -> usize {
        match self {
            Kind::Strong => 2,
            Kind::Em => 1,
        }
    }
}

/// Offset of the closer, or `None` when the span does not close.
fn scan(text: &str, marker: u8, kind: Kind) -> Option<usize> {
    let bytes = text.as_bytes();
    let start = kind.opener_len();
    let limit = start + MAX_INLINE_SCAN;

    let mut escaped = is_escape(bytes, start, marker);
    let mut pos = unit(bytes, start, marker, kind)?;
    loop {
        if pos > limit {
            log::debug!("emphasis scan gave up after {MAX_INLINE_SCAN} bytes");
            return None;
        }
        if closes(text, pos, marker, kind) {
            return Some(pos);
        }
        escaped |= is_escape(bytes, pos, marker);
        match unit(bytes, pos, marker, kind) {
            Some(next) => pos = next,
            None if escaped => return rescan(text, marker, kind),
            None => return None,
        }
    }
}

/// Depth-first search over unit splits where `\m` may also be a lone
/// backslash followed by `m`. The escape pair is tried first.
fn rescan(text: &str, marker: u8, kind: Kind) -> Option<usize> {
    let bytes = text.as_bytes();
    let start = kind.opener_len();
    let end = bytes.len().min(start + MAX_INLINE_SCAN);
    let mut seen = vec![false; end + 1];
    let mut stack = Vec::new();

    push_units(&mut stack, bytes, start, marker, kind);
    while let Some(pos) = stack.pop() {
        if pos > end || std::mem::replace(&mut seen[pos], true) {
            continue;
        }
        if closes(text, pos, marker, kind) {
            return Some(pos);
        }
        push_units(&mut stack, bytes, pos, marker, kind);
    }
    None
}

fn push_units(stack: &mut Vec<usize>, bytes: &[u8], pos: usize, marker: u8, kind: Kind) {
    if is_escape(bytes, pos, marker) {
        stack.push(pos + 1);
    }
    if let Some(next) = unit(bytes, pos, marker, kind) {
        stack.push(next);
    }
}

#[inline]
fn is_escape(bytes: &[u8], pos: usize, marker: u8) -> bool {
    bytes.get(pos) == Some(&b'\\') && bytes.get(pos + 1) == Some(&marker)
}

fn closes(text: &str, pos: usize, marker: u8, kind: Kind) -> bool {
    let bytes = text.as_bytes();
    let at = |i: usize| bytes.get(pos + i).copied();
    match kind {
        Kind::Strong => at(0) == Some(marker) && at(1) == Some(marker) && at(2) != Some(marker),
        Kind::Em => {
            at(0) == Some(marker)
                && at(1) != Some(marker)
                && (marker != b'_' || !text[pos + 1..].chars().next().is_some_and(is_word_char))
        }
    }
}

/// Consume one unit at `pos`; returns the offset after it.
fn unit(bytes: &[u8], pos: usize, marker: u8, kind: Kind) -> Option<usize> {
    let b = *bytes.get(pos)?;
    if is_escape(bytes, pos, marker) {
        return Some(pos + 2);
    }
    if b != marker {
        return Some(pos + 1);
    }
    match kind {
        Kind::Strong => memchr(marker, &bytes[pos + 1..]).map(|i| pos + i + 2),
        Kind::Em => {
            if bytes.get(pos + 1) != Some(&marker) {
                return None;
            }
            let inner = pos + 2;
            let close = inner + memchr(marker, bytes.get(inner..)?)?;
            let non_empty = marker == b'_' || close > inner;
            (non_empty && bytes.get(close + 1) == Some(&marker)).then_some(close + 2)
        }
    }
}
