//! Raw inline HTML, entity references and backslash escapes.

use memchr::memchr;

use super::{Excerpt, Inline};
use crate::cursor::Cursor;
use crate::element::Element;
use crate::html;
use crate::session::Session;

/// Bytes a backslash can escape.
const ESCAPABLE: &[u8] = b"\\`*_{}[]()>#+-.!|~";

/// An opening tag, closing tag or comment, passed through as is.
pub(super) fn markup(excerpt: &Excerpt<'_>, session: &Session<'_>) -> Option<Inline> {
    let options = session.options;
    if options.escape_raw_markup || options.safe_mode {
        return None;
    }
    let text = excerpt.text();
    memchr(b'>', text.as_bytes())?;

    let len = match excerpt.byte(1)? {
        b'/' => html::closing_tag(text),
        b'!' => html::comment(text),
        b' ' => None,
        _ => html::opening_tag(text),
    }?;
    Some(Inline::new(len, Element::raw(&text[..len])))
}

/// `&name;`, `&#123;` or `&#x1F;`.
pub(super) fn special_character(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    if excerpt.byte(1) == Some(b' ') {
        return None;
    }
    memchr(b';', text.as_bytes())?;

    let mut cursor = Cursor::new_at(text, 1);
    cursor.eat(b'#');
    if cursor.skip_while(|b| b.is_ascii_alphanumeric()) == 0 || !cursor.eat(b';') {
        return None;
    }
    let len = cursor.offset();
    Some(Inline::new(len, Element::raw(&text[..len])))
}

/// A backslash followed by an escapable byte yields that byte.
pub(super) fn escape_sequence(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let escaped = excerpt.byte(1).filter(|b| ESCAPABLE.contains(b))?;
    Some(Inline::new(2, Element::raw(char::from(escaped).to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn excerpt(text: &str) -> Excerpt<'_> {
        Excerpt { context: text, offset: 0 }
    }

    fn raw(inline: Option<Inline>) -> Option<(String, usize)> {
        let inline = inline?;
        match inline.element {
            Element::Raw(raw) => Some((raw.html, inline.extent)),
            _ => None,
        }
    }

    #[test]
    fn test_markup_tags() {
        let options = Options::default();
        let session = Session::new(&options);
        let tag = |text: &str| raw(markup(&excerpt(text), &session));
        assert_eq!(tag("<b>x"), Some(("<b>".into(), 3)));
        assert_eq!(tag("</b>x"), Some(("</b>".into(), 4)));
        assert_eq!(tag("<!-- c -->x"), Some(("<!-- c -->".into(), 10)));
        assert_eq!(tag("< b>"), None);
        assert_eq!(tag("<b"), None);
    }

    #[test]
    fn test_markup_disabled() {
        for options in [
            Options {
                safe_mode: true,
                ..Options::default()
            },
            Options {
                escape_raw_markup: true,
                ..Options::default()
            },
        ] {
            let session = Session::new(&options);
            assert!(markup(&excerpt("<b>"), &session).is_none());
        }
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(raw(special_character(&excerpt("&amp; x"))), Some(("&amp;".into(), 5)));
        assert_eq!(raw(special_character(&excerpt("&#x1F;"))), Some(("&#x1F;".into(), 6)));
        assert_eq!(raw(special_character(&excerpt("& b;"))), None);
        assert_eq!(raw(special_character(&excerpt("&;"))), None);
        assert_eq!(raw(special_character(&excerpt("&amp"))), None);
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(raw(escape_sequence(&excerpt("\\*a"))), Some(("*".into(), 2)));
        assert_eq!(raw(escape_sequence(&excerpt("\\a"))), None);
        assert_eq!(raw(escape_sequence(&excerpt("\\"))), None);
    }
}
