//! HTML escaping for text content and attribute values.
//!
//! The next byte needing replacement is located with memchr; the run
//! before it is copied in one piece.

use memchr::{memchr, memchr2, memchr3};

/// Escape text content into `out`: `&`, `<`, `>` and `"`.
///
/// # Example
/// ```
/// use blockdown::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<q>\"a\" & b</q>");
/// assert_eq!(out, b"&lt;q&gt;&quot;a&quot; &amp; b&lt;/q&gt;");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_with(out, input, |rest| {
        earliest(memchr3(b'&', b'<', b'>', rest), memchr(b'"', rest))
    });
}

/// Escape an attribute value into `out`: the text set plus `'`.
///
/// # Example
/// ```
/// use blockdown::escape::escape_attr_into;
///
/// let mut out = Vec::new();
/// escape_attr_into(&mut out, b"it's");
/// assert_eq!(out, b"it&#039;s");
/// ```
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_with(out, input, |rest| {
        earliest(memchr3(b'&', b'<', b'>', rest), memchr2(b'"', b'\'', rest))
    });
}

fn escape_with<F>(out: &mut Vec<u8>, mut input: &[u8], next: F)
where
    F: Fn(&[u8]) -> Option<usize>,
{
    out.reserve(input.len());
    while let Some(pos) = next(input) {
        out.extend_from_slice(&input[..pos]);
        out.extend_from_slice(entity(input[pos]));
        input = &input[pos + 1..];
    }
    out.extend_from_slice(input);
}

#[inline]
fn entity(b: u8) -> &'static [u8] {
    match b {
        b'&' => b"&amp;",
        b'<' => b"&lt;",
        b'>' => b"&gt;",
        b'"' => b"&quot;",
        _ => b"&#039;",
    }
}

#[inline]
fn earliest(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (found, None) | (None, found) => found,
    }
}
