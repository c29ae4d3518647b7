//! HTML output: a byte buffer writer and the element tree serializer.
//!
//! Serialization resolves deferred nodes as it reaches them, so a tree
//! straight from the block engine can be written without a separate pass.

use crate::element::{Children, Element, Node};
use crate::escape;
use crate::session::Session;

/// Growable HTML output buffer.
///
/// # Example
/// ```
/// use blockdown::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(16);
/// writer.write_str("<p>");
/// writer.write_escaped_text(b"1 < 2");
/// writer.write_str("</p>");
/// assert_eq!(writer.into_string(), "<p>1 &lt; 2</p>");
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Sized for a document of `input_len` bytes; HTML runs about a
    /// quarter larger than its source.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self::with_capacity(input_len + input_len / 4)
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Write into `out`, discarding what it holds but keeping its capacity.
    #[inline]
    pub fn with_buffer(mut out: Vec<u8>) -> Self {
        out.clear();
        Self { out }
    }

    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write `s` unescaped.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_escaped_text(&mut self, text: &[u8]) {
        escape::escape_text_into(&mut self.out, text);
    }

    #[inline]
    pub fn write_escaped_attr(&mut self, value: &[u8]) {
        escape::escape_attr_into(&mut self.out, value);
    }

    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: only `&str` data and ASCII entities are ever written.
        unsafe { std::str::from_utf8_unchecked(&self.out) }
    }

    /// Drop leading and trailing `\n` bytes.
    pub fn trim_newlines(&mut self) {
        let end = self.out.len() - self.out.iter().rev().take_while(|&&b| b == b'\n').count();
        self.out.truncate(end);
        let leading = self.out.iter().take_while(|&&b| b == b'\n').count();
        self.out.drain(..leading);
    }

    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.out
    }

    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: only `&str` data and ASCII entities are ever written.
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    /// `<name` plus every attribute that has a value. The caller closes it.
    fn open_tag<'a>(&mut self, name: &str, attributes: impl Iterator<Item = (&'a str, Option<&'a str>)>) {
        self.out.push(b'<');
        self.write_string(name);
        for (key, value) in attributes {
            let Some(value) = value else { continue };
            self.out.push(b' ');
            self.write_string(key);
            self.write_str("=\"");
            self.write_escaped_attr(value.as_bytes());
            self.out.push(b'"');
        }
    }

    #[inline]
    fn close_tag(&mut self, name: &str) {
        self.write_str("</");
        self.write_string(name);
        self.out.push(b'>');
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Write for HtmlWriter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.write_string(s);
        Ok(())
    }
}

/// Serialize a sibling sequence.
///
/// An element is preceded by a newline only when both it and the element
/// before it break lines; a newline follows the last element if it breaks.
pub(crate) fn write_elements(session: &mut Session<'_>, out: &mut HtmlWriter, elements: &mut [Element]) {
    let mut autobreak = true;
    for element in elements.iter_mut().filter(|e| !e.is_empty()) {
        let next = element.autobreak();
        autobreak = autobreak && next;
        if autobreak {
            out.newline();
        }
        write_element(session, out, element);
        autobreak = next;
    }
    if autobreak {
        out.newline();
    }
}

/// Serialize one element, resolving (and in safe mode sanitizing) it first.
pub(crate) fn write_element(session: &mut Session<'_>, out: &mut HtmlWriter, element: &mut Element) {
    match element {
        Element::Node(node) => write_node(session, out, node),
        Element::Raw(raw) => write_markup(session, out, &raw.html, raw.safe_exempt),
        Element::Empty => {}
    }
}

fn write_node(session: &mut Session<'_>, out: &mut HtmlWriter, node: &mut Node) {
    let nesting = session.prepare(node);

    if let Some(name) = node.name.as_deref() {
        out.open_tag(name, node.attributes.iter());
    }

    if matches!(node.children, Children::None) {
        if node.name.is_some() {
            out.write_str(" />");
        }
        return;
    }

    if node.name.is_some() {
        out.write_str(">");
    }

    session.enter(nesting);
    match &mut node.children {
        Children::Text(text) => out.write_escaped_text(text.as_bytes()),
        Children::RawHtml(html) => write_markup(session, out, html, false),
        Children::Single(child) => write_element(session, out, child),
        Children::Many(children) => write_elements(session, out, children),
        Children::None | Children::Deferred { .. } => {}
    }
    session.exit(nesting);

    if let Some(name) = node.name.as_deref() {
        out.close_tag(name);
    }
}

/// Raw markup is emitted as is unless safe mode forbids it.
fn write_markup(session: &Session<'_>, out: &mut HtmlWriter, html: &str, safe_exempt: bool) {
    if session.options.safe_mode && !safe_exempt {
        out.write_escaped_text(html.as_bytes());
    } else {
        out.write_string(html);
    }
}

/// Render a sequence into a fresh string, as stored by `Target::Markup`.
pub(crate) fn elements_to_string(session: &mut Session<'_>, elements: &mut [Element]) -> String {
    let mut out = HtmlWriter::with_capacity(256);
    write_elements(session, &mut out, elements);
    out.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Handler, RawFragment, Target};
    use crate::Options;

    fn render(options: &Options, mut elements: Vec<Element>) -> String {
        let mut session = Session::new(options);
        let mut out = HtmlWriter::new();
        write_elements(&mut session, &mut out, &mut elements);
        out.into_string()
    }

    #[test]
    fn test_writer_escaped_text() {
        let mut writer = HtmlWriter::new();
        writer.write_escaped_text(b"<script>");
        assert_eq!(writer.as_str(), "&lt;script&gt;");
    }

    #[test]
    fn test_writer_capacity() {
        let writer = HtmlWriter::with_capacity_for(1000);
        assert!(writer.out.capacity() >= 1250);
    }

    #[test]
    fn test_writer_trim_newlines() {
        let mut writer = HtmlWriter::new();
        writer.write_str("\n\n<p>a</p>\n");
        writer.trim_newlines();
        assert_eq!(writer.as_str(), "<p>a</p>");
    }

    #[test]
    fn test_block_siblings_are_newline_joined() {
        let html = render(
            &Options::default(),
            vec![
                Node::named("p", Children::Text("a".into())).into(),
                Element::Empty,
                Node::named("hr", Children::None).into(),
            ],
        );
        assert_eq!(html, "\n<p>a</p>\n<hr />\n");
    }

    #[test]
    fn test_inline_siblings_are_flush() {
        let mut em = Element::from(Node::named("em", Children::Text("b".into())));
        em.default_autobreak(false);
        let html = render(&Options::default(), vec![Element::text("a "), em, Element::raw("<i>c</i>")]);
        assert_eq!(html, "a <em>b</em><i>c</i>");
    }

    #[test]
    fn test_autobreak_needs_both_sides() {
        let img = Element::from(Node {
            autobreak: Some(true),
            ..Node::named("img", Children::None).with_attr("src", "x")
        });
        let html = render(&Options::default(), vec![Element::text(""), img, Element::text("")]);
        assert_eq!(html, "<img src=\"x\" />");
    }

    #[test]
    fn test_attributes_without_value_are_skipped() {
        let mut node = Node::named("a", Children::Text("x".into())).with_attr("href", "/u?a=1&b='2'");
        node.attributes.set("title", None);
        let html = render(&Options::default(), vec![node.into()]);
        assert_eq!(html, "\n<a href=\"/u?a=1&amp;b=&#039;2&#039;\">x</a>\n");
    }

    #[test]
    fn test_raw_markup_in_safe_mode() {
        let safe = Options {
            safe_mode: true,
            ..Options::default()
        };
        let fragments = || {
            vec![
                Element::raw("<b>"),
                Element::Raw(RawFragment {
                    html: "<i>".into(),
                    autobreak: false,
                    safe_exempt: true,
                }),
            ]
        };
        assert_eq!(render(&Options::default(), fragments()), "<b><i>");
        assert_eq!(render(&safe, fragments()), "&lt;b&gt;<i>");
    }

    #[test]
    fn test_deferred_inline_is_resolved() {
        let html = render(&Options::default(), vec![Node::inline("p", "*a* & b").into()]);
        assert_eq!(html, "\n<p><em>a</em> &amp; b</p>\n");
    }

    #[test]
    fn test_deferred_markup_target() {
        let node = Node::named(
            "div",
            Children::Deferred {
                handler: Handler::Inline("**x**".into()),
                target: Target::Markup,
            },
        );
        let html = render(&Options::default(), vec![node.into()]);
        assert_eq!(html, "\n<div><strong>x</strong></div>\n");
    }

    #[test]
    fn test_safe_mode_sanitizes_before_render() {
        let safe = Options {
            safe_mode: true,
            ..Options::default()
        };
        let node = Node::named("a", Children::Text("x".into()))
            .with_attr("href", "javascript:alert(1)")
            .with_attr("onclick", "x()");
        let html = render(&safe, vec![node.into()]);
        assert_eq!(html, "\n<a href=\"javascript%3Aalert(1)\">x</a>\n");
    }
}
