//! Bullet and ordered lists.
//!
//! Items live in a vector owned by the list; the item receiving lines is
//! tracked by index. Each item keeps its raw lines and is block-parsed
//! again on resolve.

use super::{open_paragraph, reference, Block, BlockKind, Body};
use crate::element::{Children, Element, Handler, Node, Target};
use crate::limits::MAX_LIST_MARKER_DIGITS;
use crate::line::Line;
use crate::session::Session;

#[derive(Debug, Clone)]
pub(crate) struct List {
    ordered: bool,
    /// Marker plus the spaces that belong to it, e.g. `"- "` or `"10. "`.
    marker: String,
    /// The bullet byte, or the delimiter (`.` or `)`) of an ordered list.
    marker_type: u8,
    /// Indentation of the most recent item's marker line.
    indent: usize,
    start: Option<String>,
    items: Vec<Vec<String>>,
    current: usize,
    loose: bool,
}

/// A list marker at the start of a line's text.
struct Marker<'a> {
    ordered: bool,
    /// Bullet or digits plus delimiter.
    token: &'a str,
    /// Spaces between the marker and the content.
    spaces: usize,
    content: &'a str,
}

impl<'a> Marker<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let bytes = text.as_bytes();
        let first = *bytes.first()?;
        let ordered = first > b'-';
        let token_len = if ordered {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 || digits > MAX_LIST_MARKER_DIGITS || !matches!(bytes.get(digits), Some(b'.' | b')')) {
                return None;
            }
            digits + 1
        } else {
            if !matches!(first, b'*' | b'+' | b'-') {
                return None;
            }
            1
        };

        let spaces = bytes[token_len..].iter().take_while(|&&b| b == b' ').count();
        if spaces == 0 && token_len < bytes.len() {
            return None;
        }
        Some(Self {
            ordered,
            token: &text[..token_len],
            spaces,
            content: &text[token_len + spaces..],
        })
    }
}

pub(super) fn start(line: &Line<'_>, current: Option<&Block>) -> Option<Block> {
    let parsed = Marker::parse(line.text())?;
    let token = parsed.token;

    let mut marker = format!("{token}{}", " ".repeat(parsed.spaces));
    let mut content = parsed.content.to_string();
    if parsed.spaces >= 5 {
        // Wide gaps are indented code inside the item; the marker keeps one space.
        let kept = parsed.spaces - 1;
        marker.truncate(marker.len() - kept);
        content.insert_str(0, &" ".repeat(kept));
    } else if parsed.spaces == 0 {
        marker.push(' ');
    }

    let marker_type = token.as_bytes()[token.len() - 1];
    let mut start = None;
    if parsed.ordered {
        let number = token[..token.len() - 1].trim_start_matches('0');
        let number = if number.is_empty() { "0" } else { number };
        if number != "1" {
            if open_paragraph(current).is_some() {
                return None;
            }
            start = Some(number.to_string());
        }
    }

    let first_item = if content.is_empty() { Vec::new() } else { vec![content] };
    let list = List {
        ordered: parsed.ordered,
        marker,
        marker_type,
        indent: line.indent,
        start,
        items: vec![first_item],
        current: 0,
        loose: false,
    };
    Some(Block::new(BlockKind::List, Body::List(list)))
}

impl List {
    pub(super) fn continue_with(
        &mut self,
        line: &Line<'_>,
        interrupted: &mut usize,
        session: &mut Session<'_>,
    ) -> bool {
        if *interrupted > 0 && self.items[self.current].is_empty() {
            return false;
        }
        let required = self.indent + self.marker.len();
        let text = line.text();

        if line.indent < required {
            if let Some(content) = self.sibling_content(text) {
                if *interrupted > 0 {
                    self.items[self.current].push(String::new());
                    self.loose = true;
                    *interrupted = 0;
                }
                self.items.push(vec![content.to_string()]);
                self.current = self.items.len() - 1;
                self.indent = line.indent;
                return true;
            }
            if Marker::parse(text).is_some() {
                return false;
            }
        }

        if line.marker() == b'[' && reference::define(text, session) {
            return true;
        }

        if line.indent >= required {
            if *interrupted > 0 {
                self.items[self.current].push(String::new());
                self.loose = true;
                *interrupted = 0;
            }
            self.items[self.current].push(line.body[required..].to_string());
            return true;
        }

        if *interrupted == 0 {
            let strip = line.indent.min(required);
            self.items[self.current].push(line.body[strip..].to_string());
            return true;
        }
        false
    }

    /// Content of a new item marked like this list, if `text` starts one.
    fn sibling_content<'t>(&self, text: &'t str) -> Option<&'t str> {
        let bytes = text.as_bytes();
        let token_len = if self.ordered {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            (digits > 0 && bytes.get(digits) == Some(&self.marker_type)).then_some(digits + 1)?
        } else {
            (bytes.first() == Some(&self.marker_type)).then_some(1)?
        };
        let rest = &text[token_len..];
        if rest.is_empty() {
            return Some(rest);
        }
        let content = rest.trim_start_matches(' ');
        (content.len() < rest.len()).then_some(content)
    }

    /// A loose list separates every item's content with a blank line.
    pub(super) fn complete(&mut self) {
        if !self.loose {
            return;
        }
        for item in &mut self.items {
            if item.last().is_none_or(|last| !last.is_empty()) {
                item.push(String::new());
            }
        }
    }

    pub(super) fn into_element(self) -> Element {
        let items = self
            .items
            .into_iter()
            .map(|lines| {
                Node::named(
                    "li",
                    Children::Deferred {
                        handler: Handler::ListItem(lines),
                        target: Target::Children,
                    },
                )
                .into()
            })
            .collect();
        let mut list = Node::named(if self.ordered { "ol" } else { "ul" }, Children::Many(items));
        if let Some(start) = self.start {
            list.attributes.set("start", Some(start));
        }
        list.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::leaf;
    use crate::Options;

    fn line(raw: &str) -> Line<'_> {
        Line::new(raw).unwrap()
    }

    fn list(block: &mut Block) -> &mut List {
        match &mut block.body {
            Body::List(list) => list,
            _ => panic!("not a list"),
        }
    }

    /// Feed `rest` to a list opened by `first`; `""` stands for a blank line.
    fn parse(first: &str, rest: &[&str]) -> List {
        let options = Options::default();
        let mut session = Session::new(&options);
        let mut block = start(&line(first), None).unwrap();
        for raw in rest {
            match Line::new(raw) {
                None => block.interrupted += 1,
                Some(l) => assert!(block.continue_with(&l, &mut session), "rejected {raw:?}"),
            }
        }
        block.complete();
        list(&mut block).clone()
    }

    #[test]
    fn test_marker_forms() {
        let mut block = start(&line("-"), None).unwrap();
        assert_eq!(list(&mut block).marker, "- ");
        assert!(list(&mut block).items[0].is_empty());

        let mut block = start(&line("2)  x"), None).unwrap();
        let parsed = list(&mut block);
        assert_eq!(parsed.marker, "2)  ");
        assert_eq!(parsed.marker_type, b')');
        assert_eq!(parsed.start.as_deref(), Some("2"));

        assert!(start(&line("-x"), None).is_none());
        assert!(start(&line("1234567890. x"), None).is_none());
    }

    #[test]
    fn test_wide_gap_becomes_code() {
        let mut block = start(&line("-      code"), None).unwrap();
        let parsed = list(&mut block);
        assert_eq!(parsed.marker, "- ");
        assert_eq!(parsed.items[0], ["     code"]);
    }

    #[test]
    fn test_ordered_start_after_paragraph() {
        let open = leaf::paragraph(&line("text"));
        assert!(start(&line("2. x"), Some(&open)).is_none());
        assert!(start(&line("1. x"), Some(&open)).is_some());
        let mut block = start(&line("007. x"), None).unwrap();
        assert_eq!(list(&mut block).start.as_deref(), Some("7"));
    }

    #[test]
    fn test_tight_items() {
        let parsed = parse("- a", &["- b", "  c", "lazy"]);
        assert_eq!(parsed.items, [vec!["a"], vec!["b", "c", "lazy"]]);
        assert!(!parsed.loose);
    }

    #[test]
    fn test_loose_items() {
        let parsed = parse("- a", &["", "- b"]);
        assert!(parsed.loose);
        assert_eq!(parsed.items, [vec!["a", ""], vec!["b", ""]]);
    }

    #[test]
    fn test_nested_content_after_blank() {
        let parsed = parse("1. a", &["", "   - b"]);
        assert!(parsed.loose);
        assert_eq!(parsed.items, [vec!["a", "", "- b", ""]]);
    }

    #[test]
    fn test_other_marker_ends_list() {
        let options = Options::default();
        let mut session = Session::new(&options);
        let mut block = start(&line("- a"), None).unwrap();
        assert!(!block.continue_with(&line("+ b"), &mut session));
        assert!(!block.continue_with(&line("1. b"), &mut session));

        let mut block = start(&line("1. a"), None).unwrap();
        assert!(block.continue_with(&line("2. b"), &mut session));
        assert!(!block.continue_with(&line("3) c"), &mut session));
    }

    #[test]
    fn test_empty_item_ends_at_blank() {
        let options = Options::default();
        let mut session = Session::new(&options);
        let mut block = start(&line("-"), None).unwrap();
        block.interrupted = 1;
        assert!(!block.continue_with(&line("  a"), &mut session));
    }

    #[test]
    fn test_reference_inside_list() {
        let options = Options::default();
        let mut session = Session::new(&options);
        let mut block = start(&line("- a"), None).unwrap();
        assert!(block.continue_with(&line("[x]: /u"), &mut session));
        assert_eq!(session.references.len(), 1);
        assert_eq!(list(&mut block).items[0], ["a"]);
    }
}
