//! Block quotes. Lines are kept and block-parsed again on resolve.

use super::{Block, BlockKind, Body};
use crate::element::{Children, Element, Handler, Node, Target};
use crate::line::Line;

#[derive(Debug, Clone)]
pub(crate) struct Quote {
    lines: Vec<String>,
}

/// Text after `>` and at most one space.
fn strip_marker(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

pub(super) fn start(line: &Line<'_>) -> Option<Block> {
    let first = strip_marker(line.text())?;
    let quote = Quote {
        lines: vec![first.to_string()],
    };
    Some(Block::new(BlockKind::Quote, Body::Quote(quote)))
}

impl Quote {
    /// Any line continues the quote until a blank line intervenes.
    pub(super) fn continue_with(&mut self, line: &Line<'_>, interrupted: usize) -> bool {
        if interrupted > 0 {
            return false;
        }
        let text = line.text();
        let content = strip_marker(text).unwrap_or(text);
        self.lines.push(content.to_string());
        true
    }

    pub(super) fn into_element(self) -> Element {
        Node::named(
            "blockquote",
            Children::Deferred {
                handler: Handler::Lines(self.lines),
                target: Target::Children,
            },
        )
        .into()
    }
}
