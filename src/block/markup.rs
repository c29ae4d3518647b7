//! HTML comments and block-level markup passed through as raw lines.

use super::{Block, BlockKind, Body};
use crate::element::{Element, RawFragment};
use crate::html;
use crate::line::Line;
use crate::Options;

/// Tags that stay inside a paragraph instead of starting a markup block.
const TEXT_LEVEL_TAGS: &[&str] = &[
    "a", "br", "bdo", "abbr", "blink", "nextid", "acronym", "basefont", "b", "em", "big", "cite",
    "small", "spacer", "listing", "i", "rp", "del", "code", "strike", "marquee", "q", "rt", "ins",
    "font", "strong", "s", "tt", "kbd", "mark", "u", "xm", "sub", "nobr", "sup", "ruby", "var",
    "span", "wbr", "time",
];

#[derive(Debug, Clone)]
pub(crate) struct RawBlock {
    html: String,
    closed: bool,
}

#[inline]
fn raw_markup_allowed(options: &Options) -> bool {
    !options.escape_raw_markup && !options.safe_mode
}

/// `<!--` opens a comment that runs until a line containing `-->`.
pub(super) fn comment(line: &Line<'_>, options: &Options) -> Option<Block> {
    if !raw_markup_allowed(options) || !line.text().starts_with("<!--") {
        return None;
    }
    let raw = RawBlock {
        html: line.body.to_string(),
        closed: line.text().contains("-->"),
    };
    Some(Block::new(BlockKind::Comment, Body::Comment(raw)))
}

/// A line opening with a block-level tag.
pub(super) fn markup(line: &Line<'_>, options: &Options) -> Option<Block> {
    if !raw_markup_allowed(options) {
        return None;
    }
    let text = line.text();
    let name = html::block_tag(text)?;
    if TEXT_LEVEL_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name)) {
        return None;
    }
    let raw = RawBlock {
        html: text.to_string(),
        closed: false,
    };
    Some(Block::new(BlockKind::Markup, Body::Markup(raw)))
}

impl RawBlock {
    /// Blank lines do not end a comment.
    pub(super) fn continue_comment(&mut self, line: &Line<'_>) -> bool {
        if self.closed {
            return false;
        }
        self.push(line);
        if line.text().contains("-->") {
            self.closed = true;
        }
        true
    }

    pub(super) fn continue_markup(&mut self, line: &Line<'_>, interrupted: usize) -> bool {
        if self.closed || interrupted > 0 {
            return false;
        }
        self.push(line);
        true
    }

    fn push(&mut self, line: &Line<'_>) {
        self.html.push('\n');
        self.html.push_str(&line.body);
    }

    pub(super) fn into_element(self) -> Element {
        Element::Raw(RawFragment {
            html: self.html,
            autobreak: true,
            safe_exempt: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Line<'_> {
        Line::new(raw).unwrap()
    }

    fn raw_html(block: Block) -> String {
        match block.into_element() {
            Element::Raw(raw) => raw.html,
            other => panic!("expected raw markup, got {other:?}"),
        }
    }

    #[test]
    fn test_comment_spans_blank_lines() {
        let options = Options::default();
        let mut block = comment(&line("<!-- a"), &options).unwrap();
        let Body::Comment(raw) = &mut block.body else { unreachable!() };
        assert!(raw.continue_comment(&line("  b -->")));
        assert!(!raw.continue_comment(&line("c")));
        assert_eq!(raw_html(block), "<!-- a\n  b -->");
    }

    #[test]
    fn test_single_line_comment_is_closed() {
        let options = Options::default();
        let mut block = comment(&line("<!-- a -->"), &options).unwrap();
        let Body::Comment(raw) = &mut block.body else { unreachable!() };
        assert!(!raw.continue_comment(&line("b")));
    }

    #[test]
    fn test_block_markup() {
        let options = Options::default();
        let mut block = markup(&line("<div class=\"x\">"), &options).unwrap();
        let Body::Markup(raw) = &mut block.body else { unreachable!() };
        assert!(raw.continue_markup(&line("  inner"), 0));
        assert!(!raw.continue_markup(&line("</div>"), 1));
        assert_eq!(raw_html(block), "<div class=\"x\">\n  inner");
    }

    #[test]
    fn test_text_level_tags_are_inline() {
        let options = Options::default();
        assert!(markup(&line("<span>x</span>"), &options).is_none());
        assert!(markup(&line("<EM>"), &options).is_none());
        assert!(markup(&line("<div"), &options).is_none());
    }

    #[test]
    fn test_disabled_by_options() {
        let options = Options {
            escape_raw_markup: true,
            ..Options::default()
        };
        assert!(markup(&line("<div>"), &options).is_none());
        assert!(comment(&line("<!-- a -->"), &options).is_none());
    }
}
