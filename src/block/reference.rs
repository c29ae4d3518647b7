//! Link reference definitions: `[label]: url "title"`.
//!
//! A definition renders nothing; it is recorded in the session's table
//! for the links of the same document.

use memchr::{memchr, memmem};

use super::{Block, BlockKind, Body};
use crate::cursor::is_space;
use crate::element::Element;
use crate::line::Line;
use crate::reference::Definition;
use crate::session::Session;

pub(super) fn start(line: &Line<'_>, session: &mut Session<'_>) -> Option<Block> {
    define(line.text(), session).then(|| Block::new(BlockKind::Reference, Body::Leaf(Element::Empty)))
}

/// Record the definition on `text`, if it is one.
pub(super) fn define(text: &str, session: &mut Session<'_>) -> bool {
    match parse_definition(text) {
        Some((label, definition)) => {
            log::trace!("reference [{label}] -> {}", definition.url);
            session.references.insert(label, definition);
            true
        }
        None => false,
    }
}

/// Split a definition line into its label and definition.
///
/// The label ends at the first `]:` that is followed by a valid
/// destination, so labels may contain `]`.
pub(crate) fn parse_definition(text: &str) -> Option<(&str, Definition)> {
    if !text.starts_with('[') {
        return None;
    }
    memchr(b']', text.as_bytes())?;
    memmem::find_iter(text.as_bytes(), b"]:")
        .filter(|&close| close >= 2)
        .find_map(|close| Some((&text[1..close], destination(&text[close + 2..])?)))
}

fn destination(rest: &str) -> Option<Definition> {
    let rest = rest.trim_start_matches(' ');
    let run = rest.bytes().take_while(|&b| !is_space(b)).count();
    if run == 0 {
        return None;
    }
    let mut url = &rest[..run];
    if url.len() > 1 {
        url = url.strip_prefix('<').unwrap_or(url);
    }
    if url.len() > 1 {
        url = url.strip_suffix('>').unwrap_or(url);
    }

    let tail = &rest[run..];
    if tail.trim_end_matches(' ').is_empty() {
        return Some(Definition {
            url: url.to_string(),
            title: None,
        });
    }

    let quoted = tail.strip_prefix(' ')?.trim_start_matches(' ').trim_end_matches(' ');
    let bytes = quoted.as_bytes();
    if bytes.len() < 3 || !matches!(bytes[0], b'"' | b'\'' | b'(') || !matches!(bytes[bytes.len() - 1], b'"' | b'\'' | b')') {
        return None;
    }
    Some(Definition {
        url: url.to_string(),
        title: Some(quoted[1..quoted.len() - 1].to_string()),
    })
}
