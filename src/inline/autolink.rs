//! Autolinks: `<scheme://...>`, `<local@host>` and bare `http(s)://` URLs.

use memchr::{memchr, memchr2, memmem};

use super::{Excerpt, Inline};
use crate::cursor::{is_word_byte, is_word_char, Cursor};
use crate::element::{Children, Node};
use crate::limits::MAX_INLINE_SCAN;
use crate::session::Session;

fn anchor(text: &str, href: String) -> Node {
    Node::named("a", Children::Text(text.to_string())).with_attr("href", href)
}

/// `<scheme://rest>` with a word-character scheme.
pub(super) fn url_tag(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    memchr(b'>', text.as_bytes())?;

    let mut cursor = Cursor::new(text);
    cursor.bump();
    if cursor.skip_while(is_word_byte) == 0 || !cursor.eat(b':') || !cursor.eat(b'/') || !cursor.eat(b'/') {
        return None;
    }
    if cursor.skip_while(|b| b != b' ' && b != b'>') == 0 || !cursor.eat(b'>') {
        return None;
    }
    let url = &text[1..cursor.offset() - 1];
    Some(Inline::new(cursor.offset(), anchor(url, url.to_string())))
}

/// `<local@host>` or `<mailto:local@host>`, case-insensitive.
pub(super) fn email_tag(excerpt: &Excerpt<'_>) -> Option<Inline> {
    let text = excerpt.text();
    memchr(b'>', text.as_bytes())?;

    let mut cursor = Cursor::new(text);
    cursor.bump();
    let has_scheme = cursor.eat_ignore_case("mailto:");
    if cursor.skip_while(is_email_local_byte) == 0 || !cursor.eat(b'@') {
        return None;
    }
    let host_start = cursor.offset();
    cursor.skip_while(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-');
    if !is_hostname(cursor.slice(host_start, cursor.offset())) || !cursor.eat(b'>') {
        return None;
    }

    let address = &text[1..cursor.offset() - 1];
    let href = if has_scheme {
        address.to_string()
    } else {
        format!("mailto:{address}")
    };
    Some(Inline::new(cursor.offset(), anchor(address, href)))
}

#[inline]
fn is_email_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b".!#$%&'*+/=?^_`{|}~-".contains(&b)
}

/// Dot-separated labels of 1 to 63 bytes, alphanumeric at both ends.
fn is_hostname(host: &str) -> bool {
    host.split('.').all(|label| {
        let bytes = label.as_bytes();
        (1..=63).contains(&bytes.len())
            && bytes[0].is_ascii_alphanumeric()
            && bytes[bytes.len() - 1].is_ascii_alphanumeric()
            && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Bare `http://` or `https://` URL, triggered by its `:`.
///
/// The URL is searched for in the remaining line, so the match may start
/// before the marker. The search window is capped at [`MAX_INLINE_SCAN`].
pub(super) fn url(excerpt: &Excerpt<'_>, session: &Session<'_>) -> Option<Inline> {
    if !session.options.autolink_bare_urls || excerpt.byte(2) != Some(b'/') {
        return None;
    }
    let context = scan_window(excerpt.context);
    memmem::find(context.as_bytes(), b"http")?;

    let (start, end) = find_bare_url(context)?;
    let url = &context[start..end];
    Some(Inline {
        position: Some(start),
        ..Inline::new(end - start, anchor(url, url.to_string()))
    })
}

fn scan_window(text: &str) -> &str {
    if text.len() <= MAX_INLINE_SCAN {
        return text;
    }
    let mut end = MAX_INLINE_SCAN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    log::debug!("bare url search truncated to {end} of {} bytes", text.len());
    &text[..end]
}

/// First `\bhttps?://[^\s<]+\b/*` in `text`, case-insensitive.
fn find_bare_url(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(i) = memchr2(b'h', b'H', &bytes[from..]) {
        let start = from + i;
        from = start + 1;
        if text[..start].chars().next_back().is_some_and(is_word_char) {
            continue;
        }
        let mut cursor = Cursor::new_at(text, start);
        if !cursor.eat_ignore_case("http") {
            continue;
        }
        if !cursor.eat(b's') {
            cursor.eat(b'S');
        }
        if !cursor.eat_ignore_case("://") {
            continue;
        }
        if let Some(end) = url_body_end(text, cursor.offset()) {
            return Some((start, end));
        }
    }
    None
}

/// End of the URL body starting at `start`: the longest run of non-space,
/// non-`<` chars, cut back to a word boundary, plus trailing slashes.
fn url_body_end(text: &str, start: usize) -> Option<usize> {
    let body = &text[start..];
    let mut boundary = None;
    let mut prev_word = None;
    let mut run = body.len();
    for (i, c) in body.char_indices() {
        if c.is_whitespace() || c == '<' {
            run = i;
            break;
        }
        let word = is_word_char(c);
        if prev_word.is_some_and(|prev| prev != word) {
            boundary = Some(i);
        }
        prev_word = Some(word);
    }
    let after = body[run..].chars().next().is_some_and(is_word_char);
    if prev_word.is_some_and(|prev| prev != after) {
        boundary = Some(run);
    }

    let end = boundary?;
    let slashes = body[end..].bytes().take_while(|&b| b == b'/').count();
    Some(start + end + slashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn excerpt(text: &str) -> Excerpt<'_> {
        Excerpt { context: text, offset: 0 }
    }

    fn href(inline: &Inline) -> Option<&str> {
        inline.element.as_node()?.attributes.get("href")
    }

    #[test]
    fn test_url_tag() {
        let inline = url_tag(&excerpt("<http://e.com/a?b> x")).unwrap();
        assert_eq!(inline.extent, 18);
        assert_eq!(href(&inline), Some("http://e.com/a?b"));
        assert!(url_tag(&excerpt("<http://e.com a>")).is_none());
        assert!(url_tag(&excerpt("<e.com>")).is_none());
    }

    #[test]
    fn test_email_tag() {
        let inline = email_tag(&excerpt("<a.b@e.com>")).unwrap();
        assert_eq!(inline.extent, 11);
        assert_eq!(href(&inline), Some("mailto:a.b@e.com"));

        let inline = email_tag(&excerpt("<MailTo:a@e.com>")).unwrap();
        assert_eq!(href(&inline), Some("MailTo:a@e.com"));

        assert!(email_tag(&excerpt("<a@-e.com>")).is_none());
        assert!(email_tag(&excerpt("<a@e..com>")).is_none());
        assert!(email_tag(&excerpt("<a@e.com")).is_none());
    }

    #[test]
    fn test_bare_url_bounds() {
        assert_eq!(find_bare_url("see http://e.com."), Some((4, 16)));
        assert_eq!(find_bare_url("http://e.com/a/// x"), Some((0, 17)));
        assert_eq!(find_bare_url("HTTPS://e.com<b>"), Some((0, 13)));
        assert_eq!(find_bare_url("xhttp://e.com"), None);
        assert_eq!(find_bare_url("http://..."), None);
        assert_eq!(find_bare_url("http://a.b-"), Some((0, 10)));
        assert_eq!(find_bare_url("http://é.com/ x"), Some((0, 14)));
    }

    #[test]
    fn test_bare_url_window_is_bounded() {
        let long = "http:/ ".repeat(MAX_INLINE_SCAN / 4);
        assert_eq!(scan_window(&long).len(), MAX_INLINE_SCAN);
        assert_eq!(find_bare_url(&long), None);

        let tail = format!("{long}http://e.com");
        assert_eq!(find_bare_url(scan_window(&tail)), None);

        let wide = format!("a{}", "é".repeat(MAX_INLINE_SCAN));
        assert_eq!(scan_window(&wide).len(), MAX_INLINE_SCAN - 1);
    }

    #[test]
    fn test_bare_url_position_and_switch() {
        let options = Options::default();
        let session = Session::new(&options);
        let text = "go http://e.com now";
        let inline = url(&Excerpt { context: text, offset: 7 }, &session).unwrap();
        assert_eq!(inline.position, Some(3));
        assert_eq!(inline.extent, 12);

        let off = Options {
            autolink_bare_urls: false,
            ..Options::default()
        };
        let session = Session::new(&off);
        assert!(url(&Excerpt { context: text, offset: 7 }, &session).is_none());
    }
}
