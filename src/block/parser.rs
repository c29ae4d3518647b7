//! Block parser implementation.

use super::{starts_for, Block, BlockKind};
use crate::element::Element;
use crate::line::Line;
use crate::session::Session;

/// Line-by-line block engine.
///
/// Holds the one block that may still accept lines. Finished blocks are
/// converted to elements as soon as they are replaced.
struct BlockParser<'s, 'p> {
    session: &'s mut Session<'p>,
    /// The block lines are currently offered to.
    current: Option<Block>,
    /// Elements of finished blocks, in document order.
    elements: Vec<Element>,
}

/// Run the block engine over `lines`.
pub(crate) fn parse_lines<S: AsRef<str>>(session: &mut Session<'_>, lines: &[S]) -> Vec<Element> {
    let mut parser = BlockParser {
        session,
        current: None,
        elements: Vec::new(),
    };
    for raw in lines {
        parser.feed(raw.as_ref());
    }
    parser.finish()
}

impl BlockParser<'_, '_> {
    fn feed(&mut self, raw: &str) {
        let Some(line) = Line::new(raw) else {
            if let Some(block) = &mut self.current {
                block.interrupted += 1;
            }
            return;
        };

        if let Some(block) = self.current.as_mut().filter(|b| b.kind.is_continuable()) {
            if block.continue_with(&line, self.session) {
                return;
            }
            if block.kind.is_completable() {
                block.complete();
            }
        }

        let candidates = std::iter::once(BlockKind::Code).chain(starts_for(line.marker()).iter().copied());
        for kind in candidates {
            if let Some(block) = kind.start(&line, self.current.as_ref(), self.session) {
                log::trace!("open {:?} at indent {}", block.kind, line.indent);
                if block.identified {
                    self.current = None;
                } else {
                    self.flush();
                }
                self.current = Some(block);
                return;
            }
        }

        if let Some(block) = self.current.as_mut().filter(|b| b.kind == BlockKind::Paragraph) {
            if block.continue_paragraph(&line) {
                return;
            }
        }
        self.flush();
        self.current = BlockKind::Paragraph.start(&line, None, self.session);
    }

    /// Move the open block, if any, to the output.
    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            log::trace!("close {:?}", block.kind);
            self.elements.push(block.into_element());
        }
    }

    fn finish(mut self) -> Vec<Element> {
        if let Some(block) = &mut self.current {
            if block.kind.is_continuable() && block.kind.is_completable() {
                block.complete();
            }
        }
        self.flush();
        self.elements
    }
}
