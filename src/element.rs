//! Element tree produced by the block and inline engines.
//!
//! Nested parses are stored as [`Children::Deferred`] and only run when a
//! traversal (rendering, sanitizing or [`crate::Parser::resolve`]) reaches
//! the node.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::inline::InlineSet;
use crate::reference::ReferenceTable;

/// A node of the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Named or unnamed node with attributes and children.
    Node(Node),
    /// Pre-rendered markup inserted as is.
    Raw(RawFragment),
    /// Renders to nothing.
    Empty,
}

/// Markup passed through verbatim (subject to safe mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    pub html: String,
    pub autobreak: bool,
    /// Emit as markup even in safe mode.
    pub safe_exempt: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// `None` renders the children without a surrounding tag.
    pub name: Option<Cow<'static, str>>,
    pub attributes: Attributes,
    pub children: Children,
    /// Overrides the default line-break behaviour (`true` for named nodes).
    pub autobreak: Option<bool>,
    /// Inline recognizers disabled inside this node's deferred inline parse.
    pub non_nestables: InlineSet,
}

/// Content of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// No content; a named node renders self-closing.
    None,
    /// Text, escaped on output.
    Text(String),
    /// Markup, emitted verbatim outside safe mode.
    RawHtml(String),
    Single(Box<Element>),
    Many(Vec<Element>),
    /// A nested parse that has not run yet.
    Deferred { handler: Handler, target: Target },
}

/// The nested parse a deferred node runs on first traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Inline-parse one logical line.
    Inline(String),
    /// Block-parse a list of lines.
    Lines(Vec<String>),
    /// Block-parse a list item's lines and unwrap a tight first paragraph.
    ListItem(Vec<String>),
}

/// Where a resolved handler's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Store the produced elements as the node's children.
    #[default]
    Children,
    /// Render the produced elements and store the markup.
    Markup,
}

/// Ordered attribute list. A `None` value is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(SmallVec<[(Cow<'static, str>, Option<String>); 2]>);

impl Attributes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.0
            .iter_mut()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_mut())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: Option<String>) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        let idx = self.0.iter().position(|(key, _)| key == name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, Option<&str>) -> bool,
    {
        self.0.retain(|(key, value)| keep(key, value.as_deref()));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(key, value)| (&**key, value.as_deref()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Node {
    /// A named node with no attributes.
    pub fn named(name: impl Into<Cow<'static, str>>, children: Children) -> Self {
        Self {
            name: Some(name.into()),
            attributes: Attributes::new(),
            children,
            autobreak: None,
            non_nestables: InlineSet::EMPTY,
        }
    }

    /// An unnamed node; renders only its children.
    pub fn unnamed(children: Children) -> Self {
        Self {
            name: None,
            attributes: Attributes::new(),
            children,
            autobreak: None,
            non_nestables: InlineSet::EMPTY,
        }
    }

    /// A named node whose children come from a deferred inline parse.
    pub fn inline(name: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        Self::named(
            name,
            Children::Deferred {
                handler: Handler::Inline(text.into()),
                target: Target::Children,
            },
        )
    }

    pub fn with_attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.attributes.set(name, Some(value.into()));
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn is_deferred(&self) -> bool {
        matches!(self.children, Children::Deferred { .. })
    }
}

impl Element {
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Element::Node(Node::unnamed(Children::Text(text.into())))
    }

    #[inline]
    pub fn raw(html: impl Into<String>) -> Self {
        Element::Raw(RawFragment {
            html: html.into(),
            autobreak: false,
            safe_exempt: false,
        })
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Element::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Element::Node(node) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Element::Empty)
    }

    /// Whether this element is separated from its siblings by newlines.
    #[inline]
    pub fn autobreak(&self) -> bool {
        match self {
            Element::Node(node) => node.autobreak.unwrap_or(node.name.is_some()),
            Element::Raw(raw) => raw.autobreak,
            Element::Empty => false,
        }
    }

    /// Set `autobreak` unless it was given explicitly.
    pub(crate) fn default_autobreak(&mut self, value: bool) {
        if let Element::Node(node) = self {
            node.autobreak.get_or_insert(value);
        }
    }

    /// Child elements of an already resolved node.
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Node(Node {
                children: Children::Many(children),
                ..
            }) => children,
            Element::Node(Node {
                children: Children::Single(child),
                ..
            }) => std::slice::from_ref(child.as_ref()),
            _ => &[],
        }
    }

    /// Visit every element, parents before children.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Element),
    {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Collect the visible text of this subtree.
    pub fn text_content(&self, out: &mut String) {
        match self {
            Element::Node(node) => match &node.children {
                Children::Text(text) => out.push_str(text),
                Children::RawHtml(html) => out.push_str(&html_escape::decode_html_entities(html)),
                Children::Single(child) => child.text_content(out),
                Children::Many(children) => children.iter().for_each(|c| c.text_content(out)),
                Children::Deferred { handler, .. } => match handler {
                    Handler::Inline(text) => out.push_str(text),
                    Handler::Lines(lines) | Handler::ListItem(lines) => out.push_str(&lines.join("\n")),
                },
                Children::None => {}
            },
            Element::Raw(raw) => out.push_str(&html_escape::decode_html_entities(&raw.html)),
            Element::Empty => {}
        }
    }
}

impl From<Node> for Element {
    #[inline]
    fn from(node: Node) -> Self {
        Element::Node(node)
    }
}

/// A parsed document: top-level elements plus the references they were
/// resolved against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub elements: Vec<Element>,
    pub references: ReferenceTable,
}

impl Document {
    /// Plain text of the document, top-level blocks separated by a blank line.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for element in self.elements.iter().filter(|e| !e.is_empty()) {
            let start = out.len();
            if start > 0 {
                out.push_str("\n\n");
            }
            let text_start = out.len();
            element.text_content(&mut out);
            if out.len() == text_start {
                out.truncate(start);
            }
        }
        out
    }

    /// True when no node still holds a deferred handler.
    pub fn is_resolved(&self) -> bool {
        let mut resolved = true;
        for element in &self.elements {
            element.walk(&mut |e| {
                if let Element::Node(node) = e {
                    resolved &= !node.is_deferred();
                }
            });
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_order() {
        let mut attrs = Attributes::new();
        attrs.set("src", Some("a.png".into()));
        attrs.set("alt", Some("A".into()));
        attrs.set("title", None);
        attrs.set("src", Some("b.png".into()));
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["src", "alt", "title"]);
        assert_eq!(attrs.get("src"), Some("b.png"));
        assert_eq!(attrs.get("title"), None);
        assert_eq!(attrs.remove("alt"), Some(Some("A".into())));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_autobreak_defaults() {
        assert!(Element::from(Node::named("p", Children::None)).autobreak());
        assert!(!Element::text("x").autobreak());
        assert!(!Element::raw("<b>").autobreak());

        let mut el = Element::from(Node::named("em", Children::None));
        el.default_autobreak(false);
        assert!(!el.autobreak());

        let mut img = Element::from(Node {
            autobreak: Some(true),
            ..Node::named("img", Children::None)
        });
        img.default_autobreak(false);
        assert!(img.autobreak());
    }

    #[test]
    fn test_walk_visits_pre_order() {
        let tree = Element::from(Node::named(
            "ul",
            Children::Many(vec![
                Node::named("li", Children::Text("a".into())).into(),
                Node::named("li", Children::Single(Box::new(Element::text("b")))).into(),
            ]),
        ));
        let mut names = Vec::new();
        tree.walk(&mut |e| names.push(e.as_node().and_then(Node::name).unwrap_or("-").to_string()));
        assert_eq!(names, ["ul", "li", "li", "-"]);
    }

    #[test]
    fn test_document_text_content() {
        let doc = Document {
            elements: vec![
                Node::named("h1", Children::Text("Title".into())).into(),
                Element::Empty,
                Element::raw("a &amp; b"),
            ],
            references: ReferenceTable::default(),
        };
        assert_eq!(doc.text_content(), "Title\n\na & b");
        assert!(doc.is_resolved());
    }
}
