//! Links and images.
//!
//! Link text is a balanced `[...]` group anchored at the marker. It is
//! followed either by an inline destination `(url "title")` or by a
//! reference: `[label]`, `[]` or nothing (the text is the label).
//! Unknown references are not links.

use memchr::memchr;

use super::{Excerpt, Inline, InlineKind, InlineSet};
use crate::cursor::Cursor;
use crate::element::{Children, Node};
use crate::reference::ReferenceTable;
use crate::session::Session;

/// Link parts before they become an element.
struct LinkParts<'a> {
    text: &'a str,
    href: String,
    title: Option<String>,
    extent: usize,
}

pub(super) fn link(excerpt: &Excerpt<'_>, session: &Session<'_>) -> Option<Inline> {
    let parts = scan_link(excerpt.text(), &session.references)?;
    let mut node = Node::inline("a", parts.text);
    node.attributes.set("href", Some(parts.href));
    node.attributes.set("title", parts.title);
    node.non_nestables = [InlineKind::Url, InlineKind::Link].into_iter().collect::<InlineSet>();
    Some(Inline::new(parts.extent, node))
}

pub(super) fn image(excerpt: &Excerpt<'_>, session: &Session<'_>) -> Option<Inline> {
    let text = excerpt.text();
    if excerpt.byte(1) != Some(b'[') {
        return None;
    }
    let parts = scan_link(&text[1..], &session.references)?;
    let mut node = Node::named("img", Children::None)
        .with_attr("src", parts.href)
        .with_attr("alt", parts.text);
    node.attributes.set("title", parts.title);
    node.autobreak = Some(true);
    Some(Inline::new(parts.extent + 1, node))
}

fn scan_link<'a>(text: &'a str, references: &ReferenceTable) -> Option<LinkParts<'a>> {
    let close = matching_bracket(text.as_bytes())?;
    let label = &text[1..close];
    let mut extent = close + 1;
    let rest = &text[extent..];

    if let Some((href, title, len)) = inline_destination(rest) {
        return Some(LinkParts {
            text: label,
            href: href.to_string(),
            title: title.map(str::to_string),
            extent: extent + len,
        });
    }

    let key = match reference_label(rest) {
        Some((name, len)) => {
            extent += len;
            if name.is_empty() { label } else { name }
        }
        None => label,
    };
    let definition = references.get(key)?;
    Some(LinkParts {
        text: label,
        href: definition.url.clone(),
        title: definition.title.clone(),
        extent,
    })
}

/// Offset of the `]` closing the `[` at offset 0.
fn matching_bracket(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `(url)`, `(url "title")` or `(url 'title')`.
///
/// The url is a run of non-space, non-paren bytes and single-level
/// `(...)` groups. Returns href, title and the consumed length.
fn inline_destination(text: &str) -> Option<(&str, Option<&str>, usize)> {
    let mut cursor = Cursor::new(text);
    if !cursor.eat(b'(') {
        return None;
    }
    cursor.skip_whitespace();

    let href_start = cursor.offset();
    loop {
        if cursor.skip_while(|b| !matches!(b, b' ' | b'(' | b')')) > 0 {
            continue;
        }
        if cursor.at(b'(') {
            let mut group = cursor;
            group.bump();
            if group.skip_while(|b| !matches!(b, b' ' | b')')) > 0 && group.eat(b')') {
                cursor = group;
                continue;
            }
        }
        break;
    }
    if cursor.offset() == href_start {
        return None;
    }
    let href = cursor.slice(href_start, cursor.offset());

    let mut title = None;
    let mut after = cursor;
    if after.skip_spaces() > 0 {
        if let Some(quote @ (b'"' | b'\'')) = after.peek() {
            after.bump();
            if let Some(end) = after.find(quote) {
                title = Some(after.slice(after.offset(), end));
                after.advance(end + 1 - after.offset());
                cursor = after;
            }
        }
    }

    cursor.skip_whitespace();
    cursor.eat(b')').then(|| (href, title, cursor.offset()))
}

/// `[label]` after optional whitespace, on one line. Returns the label and
/// the consumed length.
fn reference_label(text: &str) -> Option<(&str, usize)> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    if !cursor.eat(b'[') {
        return None;
    }
    let start = cursor.offset();
    let close = cursor.find(b']')?;
    if memchr(b'\n', &text.as_bytes()[start..close]).is_some() {
        return None;
    }
    Some((&text[start..close], close + 1))
}
