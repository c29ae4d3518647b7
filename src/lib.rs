//! blockdown: a Parsedown-flavoured Markdown to HTML converter
//!
//! Input is processed in two phases: a line-oriented block engine builds
//! an element tree whose text content is parsed lazily by an inline
//! engine when the tree is rendered or resolved.
//!
//! # Design Principles
//! - Total: every input produces HTML, nothing returns an error
//! - No regex: hand-written byte-level scanners, bounded by [`limits`]
//! - One parse owns its state: references and nesting depth live in a
//!   per-call session, so a [`Parser`] can be shared across threads
//!
//! # Example
//! ```
//! let html = blockdown::to_html("# Hello\n\n*World*");
//! assert_eq!(html, "<h1>Hello</h1>\n<p><em>World</em></p>");
//! ```

mod block;
pub mod cursor;
pub mod element;
pub mod escape;
pub mod html;
pub mod inline;
pub mod limits;
pub mod line;
pub mod reference;
pub mod registry;
pub mod render;
pub mod sanitize;
mod session;

// Re-export primary types
pub use element::{Document, Element, Node};
pub use inline::{InlineKind, InlineSet, UnknownInlineKind};
pub use reference::{Definition, ReferenceTable};
pub use registry::{instance, Registry};
pub use render::HtmlWriter;

use session::Session;

/// Parsing/rendering options.
///
/// ```
/// let options = blockdown::Options {
///     safe_mode: true,
///     ..blockdown::Options::default()
/// };
/// assert!(options.autolink_bare_urls);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Turn every line break inside a paragraph into `<br />`.
    pub break_on_newline: bool,
    /// Disable raw HTML blocks and inline tags; they render as text.
    pub escape_raw_markup: bool,
    /// Link bare `http://` and `https://` URLs.
    pub autolink_bare_urls: bool,
    /// Sanitize URLs and attribute names and escape all raw markup.
    pub safe_mode: bool,
    /// Require a space after the `#` run of a heading.
    pub strict_headings: bool,
    /// URL prefixes allowed through the sanitizer in safe mode.
    pub safe_links: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            break_on_newline: false,
            escape_raw_markup: false,
            autolink_bare_urls: true,
            safe_mode: false,
            strict_headings: false,
            safe_links: sanitize::DEFAULT_SAFE_LINKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A configured converter. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: Options,
}

impl Parser {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Convert a whole document.
    ///
    /// Reference definitions are collected per call; nothing carries over
    /// to the next document.
    pub fn render_document(&self, text: &str) -> String {
        let mut out = HtmlWriter::with_capacity_for(text.len());
        self.render_document_into(text, &mut out);
        out.into_string()
    }

    fn render_document_into(&self, text: &str, out: &mut HtmlWriter) {
        let mut session = Session::new(&self.options);
        let mut elements = session.text_elements(text);
        render::write_elements(&mut session, out, &mut elements);
        out.trim_newlines();
    }

    /// Convert one line of inline Markdown.
    ///
    /// Recognizers in `non_nestables` are disabled. No reference
    /// definitions are known, so only inline links resolve.
    ///
    /// ```
    /// use blockdown::{InlineKind, InlineSet, Parser};
    ///
    /// let parser = Parser::default();
    /// assert_eq!(parser.render_inline("*a* [b](/c)", InlineSet::EMPTY), "<em>a</em> <a href=\"/c\">b</a>");
    /// let no_links = InlineSet::of(InlineKind::Link);
    /// assert_eq!(parser.render_inline("[b](/c)", no_links), "[b](/c)");
    /// ```
    pub fn render_inline(&self, text: &str, non_nestables: InlineSet) -> String {
        let mut session = Session::new(&self.options);
        let mut elements = session.line_elements(text, non_nestables);
        let mut out = HtmlWriter::with_capacity_for(text.len());
        render::write_elements(&mut session, &mut out, &mut elements);
        out.into_string()
    }

    /// Parse a document into a fully resolved element tree.
    ///
    /// In safe mode the tree is sanitized as it is resolved.
    pub fn parse(&self, text: &str) -> Document {
        let mut session = Session::new(&self.options);
        let mut elements = session.text_elements(text);
        session.resolve_all(&mut elements);
        Document {
            elements,
            references: session.into_references(),
        }
    }

    /// Run every deferred parse left in `document`. Idempotent.
    pub fn resolve(&self, document: &mut Document) {
        let references = std::mem::take(&mut document.references);
        let mut session = Session::with_references(&self.options, references);
        session.resolve_all(&mut document.elements);
        document.references = session.into_references();
    }

    /// Serialize a document built by [`Parser::parse`].
    pub fn render(&self, document: &Document) -> String {
        let mut session = Session::with_references(&self.options, document.references.clone());
        let mut elements = document.elements.clone();
        let mut out = HtmlWriter::new();
        render::write_elements(&mut session, &mut out, &mut elements);
        out.trim_newlines();
        out.into_string()
    }
}

/// Convert Markdown to HTML.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = blockdown::to_html("# Hello\n\nWorld");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn to_html(input: &str) -> String {
    Parser::default().render_document(input)
}

/// Convert Markdown to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    Parser::new(options.clone()).render_document(input)
}

/// Convert Markdown to HTML, writing into a provided buffer.
///
/// The buffer is cleared first; its capacity is reused.
pub fn to_html_into(input: &str, out: &mut Vec<u8>) {
    let mut writer = HtmlWriter::with_buffer(std::mem::take(out));
    Parser::default().render_document_into(input, &mut writer);
    *out = writer.into_vec();
}
