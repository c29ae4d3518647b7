//! State of one top-level parse: options, references and nesting depth.

use crate::block;
use crate::element::{Children, Element, Handler, Node, Target};
use crate::inline::{self, InlineSet};
use crate::limits::{MAX_BLOCK_NESTING, MAX_INLINE_NESTING};
use crate::line::normalize_newlines;
use crate::reference::ReferenceTable;
use crate::render;
use crate::sanitize::sanitize_node;
use crate::Options;

/// The kind of nested parse a node's children came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nesting {
    None,
    Block,
    Inline,
}

/// Owns everything that must not outlive one `render_document` call.
pub(crate) struct Session<'p> {
    pub(crate) options: &'p Options,
    pub(crate) references: ReferenceTable,
    block_depth: usize,
    inline_depth: usize,
}

impl<'p> Session<'p> {
    pub(crate) fn new(options: &'p Options) -> Self {
        Self::with_references(options, ReferenceTable::new())
    }

    pub(crate) fn with_references(options: &'p Options, references: ReferenceTable) -> Self {
        Self {
            options,
            references,
            block_depth: 0,
            inline_depth: 0,
        }
    }

    pub(crate) fn into_references(self) -> ReferenceTable {
        self.references
    }

    /// Split a document into lines and run the block engine on them.
    pub(crate) fn text_elements(&mut self, text: &str) -> Vec<Element> {
        self.references.clear();
        let text = normalize_newlines(text);
        let text = text.trim_matches('\n');
        let lines: Vec<&str> = text.split('\n').collect();
        self.lines_elements(&lines)
    }

    /// Block-parse `lines`. Past the nesting limit the lines become one
    /// text paragraph.
    pub(crate) fn lines_elements<S: AsRef<str>>(&mut self, lines: &[S]) -> Vec<Element> {
        if self.block_depth >= MAX_BLOCK_NESTING {
            log::debug!("block nesting limit of {MAX_BLOCK_NESTING} reached, keeping {} lines as text", lines.len());
            let text = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
            return vec![Node::named("p", Children::Text(text)).into()];
        }
        block::parse_lines(self, lines)
    }

    /// Block-parse a list item; a tight item's first paragraph loses its tag.
    pub(crate) fn list_item(&mut self, lines: &[String]) -> Vec<Element> {
        let mut elements = self.lines_elements(lines);
        if !lines.iter().any(String::is_empty) {
            if let Some(Element::Node(first)) = elements.first_mut() {
                if first.name() == Some("p") {
                    first.name = None;
                }
            }
        }
        elements
    }

    /// Inline-parse `text`. Past the nesting limit the text stays plain.
    pub(crate) fn line_elements(&mut self, text: &str, non_nestables: InlineSet) -> Vec<Element> {
        if self.inline_depth >= MAX_INLINE_NESTING {
            log::debug!("inline nesting limit of {MAX_INLINE_NESTING} reached");
            return vec![Element::text(text)];
        }
        inline::parse_line(self, text, non_nestables)
    }

    /// Sanitize (in safe mode) and resolve a node before it is inspected.
    ///
    /// Returns the nesting its children belong to, for [`Session::enter`].
    pub(crate) fn prepare(&mut self, node: &mut Node) -> Nesting {
        if self.options.safe_mode {
            sanitize_node(node, &self.options.safe_links);
        }
        self.resolve(node)
    }

    /// Run a deferred handler once. Nodes without one are left untouched.
    pub(crate) fn resolve(&mut self, node: &mut Node) -> Nesting {
        if !node.is_deferred() {
            return Nesting::None;
        }
        let Children::Deferred { handler, target } = std::mem::replace(&mut node.children, Children::None) else {
            return Nesting::None;
        };
        let (mut elements, nesting) = match handler {
            Handler::Inline(text) => (self.line_elements(&text, node.non_nestables), Nesting::Inline),
            Handler::Lines(lines) => (self.lines_elements(&lines), Nesting::Block),
            Handler::ListItem(lines) => (self.list_item(&lines), Nesting::Block),
        };
        node.children = match target {
            Target::Children => Children::Many(elements),
            Target::Markup => {
                self.enter(nesting);
                let html = render::elements_to_string(self, &mut elements);
                self.exit(nesting);
                Children::RawHtml(html)
            }
        };
        nesting
    }

    /// Resolve a whole tree, parents before children.
    pub(crate) fn resolve_all(&mut self, elements: &mut [Element]) {
        for element in elements {
            let Element::Node(node) = element else { continue };
            let nesting = self.prepare(node);
            self.enter(nesting);
            match &mut node.children {
                Children::Single(child) => self.resolve_all(std::slice::from_mut(child.as_mut())),
                Children::Many(children) => self.resolve_all(children),
                _ => {}
            }
            self.exit(nesting);
        }
    }

    #[inline]
    pub(crate) fn enter(&mut self, nesting: Nesting) {
        match nesting {
            Nesting::Block => self.block_depth += 1,
            Nesting::Inline => self.inline_depth += 1,
            Nesting::None => {}
        }
    }

    #[inline]
    pub(crate) fn exit(&mut self, nesting: Nesting) {
        match nesting {
            Nesting::Block => self.block_depth -= 1,
            Nesting::Inline => self.inline_depth -= 1,
            Nesting::None => {}
        }
    }
}
