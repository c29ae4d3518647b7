//! Fenced code blocks (```` ``` ```` or `~~~`).

use super::{code_element, Block, BlockKind, Body};
use crate::element::Element;
use crate::line::Line;

#[derive(Debug, Clone)]
pub(crate) struct Fence {
    marker: u8,
    /// Length of the opening run; the closer must be at least as long.
    opener_len: usize,
    class: Option<String>,
    text: String,
    complete: bool,
}

pub(super) fn start(line: &Line<'_>) -> Option<Block> {
    let text = line.text();
    let marker = line.marker();
    let opener_len = run_len(text, marker);
    if opener_len < 3 {
        return None;
    }

    let info = text[opener_len..].trim_matches(|c| c == ' ' || c == '\t');
    if marker == b'`' && info.contains('`') {
        return None;
    }
    let class = (!info.is_empty()).then(|| {
        let end = info
            .find([' ', '\t', '\n', '\x0c', '\r'])
            .unwrap_or(info.len());
        format!("language-{}", &info[..end])
    });

    let fence = Fence {
        marker,
        opener_len,
        class,
        text: String::new(),
        complete: false,
    };
    Some(Block::new(BlockKind::FencedCode, Body::Fence(fence)))
}

#[inline]
fn run_len(text: &str, marker: u8) -> usize {
    text.bytes().take_while(|&b| b == marker).count()
}

impl Fence {
    pub(super) fn continue_with(&mut self, line: &Line<'_>, interrupted: &mut usize) -> bool {
        if self.complete {
            return false;
        }
        for _ in 0..*interrupted {
            self.text.push('\n');
        }
        *interrupted = 0;

        let text = line.text();
        let len = run_len(text, self.marker);
        if len >= self.opener_len && text[len..].trim_end_matches(' ').is_empty() {
            // Every appended line starts with '\n'; drop the first one.
            if !self.text.is_empty() {
                self.text.remove(0);
            }
            self.complete = true;
            return true;
        }

        self.text.push('\n');
        self.text.push_str(&line.body);
        true
    }

    pub(super) fn into_element(self) -> Element {
        code_element(self.text, self.class)
    }
}
