//! Strikethrough (`~~text~~`).
//!
//! Content is non-empty, starts and ends with a non-space byte and stays
//! on one line. The first qualifying closer wins.

use memchr::memchr;

use super::{Excerpt, Inline};
use crate::cursor::is_space;
use crate::element::Node;
use crate::limits::MAX_INLINE_SCAN;

pub(super) fn strikethrough(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    let bytes = text.as_bytes();
    if bytes.get(1) != Some(&b'~') || bytes.get(2).is_none_or(|&b| is_space(b)) {
        return None;
    }

    let line_end = memchr(b'\n', bytes).unwrap_or(bytes.len());
    let limit = line_end.min(2 + MAX_INLINE_SCAN);
    let mut pos = 3;
    while pos + 1 < limit {
        let closer = pos + memchr(b'~', &bytes[pos..limit])?;
        if bytes.get(closer + 1) == Some(&b'~') && !is_space(bytes[closer - 1]) && closer + 2 <= line_end {
            return Some(Inline::new(closer + 2, Node::inline("del", &text[2..closer])));
        }
        pos = closer + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Children, Handler};

    fn del(text: &str) -> Option<(String, usize)> {
        let inline = strikethrough(&Excerpt { context: text, offset: 0 })?;
        match &inline.element.as_node()?.children {
            Children::Deferred {
                handler: Handler::Inline(content),
                ..
            } => Some((content.clone(), inline.extent)),
            _ => None,
        }
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(del("~~a~~"), Some(("a".into(), 5)));
        assert_eq!(del("~~a b~~ c~~"), Some(("a b".into(), 7)));
    }

    #[test]
    fn test_whitespace_edges_rejected() {
        assert_eq!(del("~~ a~~"), None);
        assert_eq!(del("~~a ~~"), None);
        assert_eq!(del("~~a ~~b~~"), Some(("a ~~b".into(), 9)));
    }

    #[test]
    fn test_single_line_only() {
        assert_eq!(del("~~a\nb~~"), None);
        assert_eq!(del("~a~"), None);
        assert_eq!(del("~~~~"), None);
    }
}
