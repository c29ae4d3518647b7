//! Block-level parser for Markdown.
//!
//! The block parser is line-oriented. One block is open at a time; each
//! line is offered to it first, then to the block starts registered for
//! the line's first byte, and otherwise joins or opens a paragraph.
//! Containers (quotes and list items) keep their lines and are parsed
//! again when the element tree is resolved.

mod fence;
mod leaf;
mod list;
mod markup;
mod parser;
mod quote;
mod reference;
mod table;

pub(crate) use parser::parse_lines;

use crate::element::{Children, Element, Node};
use crate::line::Line;
use crate::session::Session;

/// Every block the engine knows, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum BlockKind {
    Code,
    Comment,
    FencedCode,
    Header,
    List,
    Quote,
    Rule,
    SetextHeader,
    Markup,
    Reference,
    Table,
    Paragraph,
}

impl BlockKind {
    /// Whether an open block of this kind is offered the next line.
    #[inline]
    pub(crate) fn is_continuable(self) -> bool {
        matches!(
            self,
            BlockKind::Code
                | BlockKind::Comment
                | BlockKind::FencedCode
                | BlockKind::List
                | BlockKind::Quote
                | BlockKind::Markup
                | BlockKind::Table
        )
    }

    /// Whether the block needs a final step once it stops continuing.
    #[inline]
    pub(crate) fn is_completable(self) -> bool {
        matches!(self, BlockKind::Code | BlockKind::FencedCode | BlockKind::List)
    }

    /// Try to open a block of this kind on `line`.
    pub(crate) fn start(
        self,
        line: &Line<'_>,
        current: Option<&Block>,
        session: &mut Session<'_>,
    ) -> Option<Block> {
        let options = session.options;
        match self {
            BlockKind::Code => leaf::code(line, current),
            BlockKind::Comment => markup::comment(line, options),
            BlockKind::FencedCode => fence::start(line),
            BlockKind::Header => leaf::header(line, options),
            BlockKind::List => list::start(line, current),
            BlockKind::Quote => quote::start(line),
            BlockKind::Rule => leaf::rule(line),
            BlockKind::SetextHeader => leaf::setext_header(line, current),
            BlockKind::Markup => markup::markup(line, options),
            BlockKind::Reference => reference::start(line, session),
            BlockKind::Table => table::start(line, current),
            BlockKind::Paragraph => Some(leaf::paragraph(line)),
        }
    }
}

/// Block starts tried for a line, by the first byte of its text.
///
/// Indented code is tried before these for every line.
pub(crate) fn starts_for(marker: u8) -> &'static [BlockKind] {
    use BlockKind::*;
    match marker {
        b'#' => &[Header],
        b'*' => &[Rule, List],
        b'+' => &[List],
        b'-' => &[SetextHeader, Table, Rule, List],
        b'0'..=b'9' => &[List],
        b':' | b'|' => &[Table],
        b'<' => &[Comment, Markup],
        b'=' => &[SetextHeader],
        b'>' => &[Quote],
        b'[' => &[Reference],
        b'_' => &[Rule],
        b'`' | b'~' => &[FencedCode],
        _ => &[],
    }
}

/// State a block accumulates while lines are fed to it.
#[derive(Debug, Clone)]
pub(crate) enum Body {
    /// Finished on its first line.
    Leaf(Element),
    Paragraph(leaf::Paragraph),
    Code(leaf::IndentedCode),
    Fence(fence::Fence),
    Comment(markup::RawBlock),
    Markup(markup::RawBlock),
    List(list::List),
    Quote(quote::Quote),
    Table(table::Table),
}

/// An open block.
#[derive(Debug, Clone)]
pub(crate) struct Block {
    pub(crate) kind: BlockKind,
    pub(crate) body: Body,
    /// The block replaces the open paragraph instead of following it.
    pub(crate) identified: bool,
    /// Blank lines seen since the block last accepted a line.
    pub(crate) interrupted: usize,
}

impl Block {
    pub(crate) fn new(kind: BlockKind, body: Body) -> Self {
        Self {
            kind,
            body,
            identified: false,
            interrupted: 0,
        }
    }

    #[inline]
    pub(crate) fn identified(mut self) -> Self {
        self.identified = true;
        self
    }

    /// Offer `line` to the block. On `false` the block is unchanged.
    pub(crate) fn continue_with(&mut self, line: &Line<'_>, session: &mut Session<'_>) -> bool {
        let interrupted = &mut self.interrupted;
        match &mut self.body {
            Body::Code(code) => code.continue_with(line, interrupted),
            Body::Fence(fence) => fence.continue_with(line, interrupted),
            Body::Comment(comment) => comment.continue_comment(line),
            Body::Markup(markup) => markup.continue_markup(line, *interrupted),
            Body::List(list) => list.continue_with(line, interrupted, session),
            Body::Quote(quote) => quote.continue_with(line, *interrupted),
            Body::Table(table) => table.continue_with(line, *interrupted),
            Body::Paragraph(_) | Body::Leaf(_) => false,
        }
    }

    /// Append `line` to an open paragraph.
    pub(crate) fn continue_paragraph(&mut self, line: &Line<'_>) -> bool {
        match &mut self.body {
            Body::Paragraph(paragraph) if self.interrupted == 0 => {
                paragraph.push_line(line.text());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn complete(&mut self) {
        if let Body::List(list) = &mut self.body {
            list.complete();
        }
    }

    pub(crate) fn into_element(self) -> Element {
        match self.body {
            Body::Leaf(element) => element,
            Body::Paragraph(paragraph) => paragraph.into_element(),
            Body::Code(code) => code.into_element(),
            Body::Fence(fence) => fence.into_element(),
            Body::Comment(raw) | Body::Markup(raw) => raw.into_element(),
            Body::List(list) => list.into_element(),
            Body::Quote(quote) => quote.into_element(),
            Body::Table(table) => table.into_element(),
        }
    }
}

/// The open block when it is a paragraph no blank line has interrupted.
pub(crate) fn open_paragraph(current: Option<&Block>) -> Option<&leaf::Paragraph> {
    let block = current.filter(|b| b.kind == BlockKind::Paragraph && b.interrupted == 0)?;
    match &block.body {
        Body::Paragraph(paragraph) => Some(paragraph),
        _ => None,
    }
}

/// `pre > code` around `text`, with an optional class on `code`.
pub(crate) fn code_element(text: String, class: Option<String>) -> Element {
    let mut code = Node::named("code", Children::Text(text));
    if let Some(class) = class {
        code.attributes.set("class", Some(class));
    }
    Node::named("pre", Children::Single(Box::new(code.into()))).into()
}
