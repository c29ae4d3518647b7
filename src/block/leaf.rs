//! Headings, rules, indented code and paragraphs.

use super::{code_element, open_paragraph, Block, BlockKind, Body};
use crate::element::{Children, Element, Node};
use crate::line::Line;
use crate::Options;

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Paragraph text, also carried by a setext heading.
#[derive(Debug, Clone)]
pub(crate) struct Paragraph {
    name: &'static str,
    text: String,
}

impl Paragraph {
    pub(super) fn push_line(&mut self, text: &str) {
        self.text.push('\n');
        self.text.push_str(text);
    }

    #[inline]
    pub(super) fn text(&self) -> &str {
        &self.text
    }

    pub(super) fn into_element(self) -> Element {
        Node::inline(self.name, self.text).into()
    }
}

/// Code indented by at least four spaces.
#[derive(Debug, Clone)]
pub(crate) struct IndentedCode {
    text: String,
}

impl IndentedCode {
    pub(super) fn continue_with(&mut self, line: &Line<'_>, interrupted: &mut usize) -> bool {
        if line.indent < 4 {
            return false;
        }
        for _ in 0..*interrupted {
            self.text.push('\n');
        }
        *interrupted = 0;
        self.text.push('\n');
        self.text.push_str(&line.body[4..]);
        true
    }

    pub(super) fn into_element(self) -> Element {
        code_element(self.text, None)
    }
}

pub(super) fn code(line: &Line<'_>, current: Option<&Block>) -> Option<Block> {
    if line.indent < 4 || open_paragraph(current).is_some() {
        return None;
    }
    let code = IndentedCode {
        text: line.body[4..].to_string(),
    };
    Some(Block::new(BlockKind::Code, Body::Code(code)))
}

/// `#` to `######`, with closing hashes dropped.
pub(super) fn header(line: &Line<'_>, options: &Options) -> Option<Block> {
    let text = line.text();
    let level = text.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > HEADINGS.len() {
        return None;
    }
    let content = text.trim_matches('#');
    if options.strict_headings && content.bytes().next().is_some_and(|b| b != b' ') {
        return None;
    }
    let content = content.trim_matches(' ');
    let element = Node::inline(HEADINGS[level - 1], content).into();
    Some(Block::new(BlockKind::Header, Body::Leaf(element)))
}

/// Three or more of the same `*`, `-` or `_`, optionally spaced.
pub(super) fn rule(line: &Line<'_>) -> Option<Block> {
    let marker = line.marker();
    let text = line.text();
    let count = text.bytes().filter(|&b| b == marker).count();
    if count < 3 || !text.bytes().all(|b| b == b' ' || b == marker) {
        return None;
    }
    let element = Node::named("hr", Children::None).into();
    Some(Block::new(BlockKind::Rule, Body::Leaf(element)))
}

/// An `===` or `---` underline turns the open paragraph into a heading.
pub(super) fn setext_header(line: &Line<'_>, current: Option<&Block>) -> Option<Block> {
    let paragraph = open_paragraph(current)?;
    if line.indent >= 4 {
        return None;
    }
    let marker = line.marker();
    if !line.text().trim_end_matches(' ').bytes().all(|b| b == marker) {
        return None;
    }
    let heading = Paragraph {
        name: if marker == b'=' { "h1" } else { "h2" },
        text: paragraph.text.clone(),
    };
    Some(Block::new(BlockKind::SetextHeader, Body::Paragraph(heading)).identified())
}

pub(super) fn paragraph(line: &Line<'_>) -> Block {
    let paragraph = Paragraph {
        name: "p",
        text: line.text().to_string(),
    };
    Block::new(BlockKind::Paragraph, Body::Paragraph(paragraph)).identified()
}
