//! Inline parser for Markdown.
//!
//! Scans a line for the next marker byte (`! * _ & [ : < ` ~ \`), offers
//! the excerpt starting there to the recognizers registered for that
//! marker, and flushes everything before an accepted match as text.
//! Nested spans (emphasis, link text) are not parsed here: they are left
//! as deferred handlers on the produced node.

mod autolink;
mod code_span;
mod emphasis;
mod links;
mod markup;
mod strikethrough;
mod text;

use std::fmt;
use std::str::FromStr;

use crate::element::Element;
use crate::line::normalize_newlines;
use crate::session::Session;

/// The inline recognizers, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Code,
    EmailTag,
    Emphasis,
    EscapeSequence,
    Image,
    Link,
    Markup,
    SpecialCharacter,
    Strikethrough,
    Url,
    UrlTag,
}

impl InlineKind {
    pub const ALL: [InlineKind; 11] = [
        InlineKind::Code,
        InlineKind::EmailTag,
        InlineKind::Emphasis,
        InlineKind::EscapeSequence,
        InlineKind::Image,
        InlineKind::Link,
        InlineKind::Markup,
        InlineKind::SpecialCharacter,
        InlineKind::Strikethrough,
        InlineKind::Url,
        InlineKind::UrlTag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InlineKind::Code => "Code",
            InlineKind::EmailTag => "EmailTag",
            InlineKind::Emphasis => "Emphasis",
            InlineKind::EscapeSequence => "EscapeSequence",
            InlineKind::Image => "Image",
            InlineKind::Link => "Link",
            InlineKind::Markup => "Markup",
            InlineKind::SpecialCharacter => "SpecialCharacter",
            InlineKind::Strikethrough => "Strikethrough",
            InlineKind::Url => "Url",
            InlineKind::UrlTag => "UrlTag",
        }
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }

    fn recognize(self, excerpt: &Excerpt<'_>, session: &Session<'_>) -> Option<Inline> {
        match self {
            InlineKind::Code => code_span::code(excerpt),
            InlineKind::EmailTag => autolink::email_tag(excerpt),
            InlineKind::Emphasis => emphasis::emphasis(excerpt),
            InlineKind::EscapeSequence => markup::escape_sequence(excerpt),
            InlineKind::Image => links::image(excerpt, session),
            InlineKind::Link => links::link(excerpt, session),
            InlineKind::Markup => markup::markup(excerpt, session),
            InlineKind::SpecialCharacter => markup::special_character(excerpt),
            InlineKind::Strikethrough => strikethrough::strikethrough(excerpt),
            InlineKind::Url => autolink::url(excerpt, session),
            InlineKind::UrlTag => autolink::url_tag(excerpt),
        }
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no inline recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInlineKind(pub String);

impl fmt::Display for UnknownInlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown inline kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownInlineKind {}

impl FromStr for InlineKind {
    type Err = UnknownInlineKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InlineKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownInlineKind(s.to_string()))
    }
}

/// A set of inline recognizers, used to disable recognizers inside a span.
///
/// # Example
/// ```
/// use blockdown::{InlineKind, InlineSet};
///
/// let set: InlineSet = [InlineKind::Link, InlineKind::Url].into_iter().collect();
/// assert!(set.contains(InlineKind::Url));
/// assert!(!set.contains(InlineKind::Image));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InlineSet(u16);

impl InlineSet {
    pub const EMPTY: InlineSet = InlineSet(0);

    #[inline]
    pub const fn of(kind: InlineKind) -> Self {
        InlineSet(kind.bit())
    }

    #[inline]
    pub fn insert(&mut self, kind: InlineKind) {
        self.0 |= kind.bit();
    }

    #[inline]
    pub fn contains(self, kind: InlineKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub const fn union(self, other: InlineSet) -> Self {
        InlineSet(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = InlineKind> {
        InlineKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<InlineKind> for InlineSet {
    fn from_iter<I: IntoIterator<Item = InlineKind>>(iter: I) -> Self {
        let mut set = InlineSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// The text a recognizer sees: the unparsed remainder of the line
/// (`context`) and the offset of the marker that triggered it.
pub(crate) struct Excerpt<'a> {
    pub context: &'a str,
    pub offset: usize,
}

impl<'a> Excerpt<'a> {
    /// Text from the marker to the end of the line.
    #[inline]
    pub fn text(&self) -> &'a str {
        &self.context[self.offset..]
    }

    /// Byte `i` positions after the marker.
    #[inline]
    pub fn byte(&self, i: usize) -> Option<u8> {
        self.context.as_bytes().get(self.offset + i).copied()
    }
}

/// A recognizer match.
pub(crate) struct Inline {
    /// Start of the match within the excerpt's context; the marker when `None`.
    pub position: Option<usize>,
    /// Length of the match in bytes.
    pub extent: usize,
    pub element: Element,
}

impl Inline {
    #[inline]
    pub fn new(extent: usize, element: impl Into<Element>) -> Self {
        Self {
            position: None,
            extent,
            element: element.into(),
        }
    }
}

/// Lookup table for marker bytes.
static MARKERS: [bool; 256] = {
    let mut table = [false; 256];
    let markers = b"!*_&[:<`~\\";
    let mut i = 0;
    while i < markers.len() {
        table[markers[i] as usize] = true;
        i += 1;
    }
    table
};

#[inline]
fn find_marker(text: &[u8]) -> Option<usize> {
    text.iter().position(|&b| MARKERS[b as usize])
}

/// Recognizers tried for a marker, in priority order.
fn recognizers(marker: u8) -> &'static [InlineKind] {
    use InlineKind::*;
    match marker {
        b'!' => &[Image],
        b'&' => &[SpecialCharacter],
        b'*' | b'_' => &[Emphasis],
        b':' => &[Url],
        b'<' => &[UrlTag, EmailTag, Markup],
        b'[' => &[Link],
        b'`' => &[Code],
        b'~' => &[Strikethrough],
        b'\\' => &[EscapeSequence],
        _ => &[],
    }
}

/// Parse one logical line into a flat element sequence.
///
/// Every produced element defaults to `autobreak = false`.
pub(crate) fn parse_line(session: &Session<'_>, text: &str, non_nestables: InlineSet) -> Vec<Element> {
    let text = normalize_newlines(text);
    let breaks = session.options.break_on_newline;
    let mut elements = Vec::new();
    let mut rest: &str = &text;

    while let Some(marker_pos) = find_marker(rest.as_bytes()) {
        let excerpt = Excerpt {
            context: rest,
            offset: marker_pos,
        };
        let matched = recognizers(rest.as_bytes()[marker_pos])
            .iter()
            .filter(|kind| !non_nestables.contains(**kind))
            .find_map(|kind| {
                let inline = kind.recognize(&excerpt, session)?;
                let position = inline.position.unwrap_or(marker_pos);
                (position <= marker_pos).then_some((position, inline))
            });

        match matched {
            Some((position, mut inline)) => {
                if let Element::Node(node) = &mut inline.element {
                    node.non_nestables = node.non_nestables.union(non_nestables);
                }
                elements.push(text::inline_text(&rest[..position], breaks));
                elements.push(inline.element);
                rest = &rest[position + inline.extent..];
            }
            None => {
                elements.push(text::inline_text(&rest[..=marker_pos], breaks));
                rest = &rest[marker_pos + 1..];
            }
        }
    }
    elements.push(text::inline_text(rest, breaks));

    for element in &mut elements {
        element.default_autobreak(false);
    }
    elements
}
