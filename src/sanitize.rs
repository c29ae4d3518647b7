//! Safe-mode attribute and URL filtering.

use crate::element::Node;

/// URL prefixes a link or image may start with in safe mode.
pub const DEFAULT_SAFE_LINKS: &[&str] = &[
    "http://",
    "https://",
    "ftp://",
    "ftps://",
    "mailto:",
    "tel:",
    "data:image/png;base64,",
    "data:image/gif;base64,",
    "data:image/jpeg;base64,",
    "irc:",
    "ircs:",
    "git:",
    "ssh:",
    "news:",
    "steam:",
];

/// Sanitize one node in place. Children are left alone.
pub fn sanitize_node<S: AsRef<str>>(node: &mut Node, safe_links: &[S]) {
    let url_attribute = match node.name() {
        None => {
            node.attributes.clear();
            return;
        }
        Some("a") => Some("href"),
        Some("img") => Some("src"),
        Some(_) => None,
    };

    if let Some(url) = url_attribute.and_then(|name| node.attributes.get_mut(name)) {
        filter_unsafe_url(url, safe_links);
    }

    node.attributes
        .retain(|name, _| is_good_attribute(name) && !starts_with_ignore_case(name, "on"));
}

/// Neutralize a URL whose scheme is not allow-listed by encoding every `:`.
pub fn filter_unsafe_url<S: AsRef<str>>(url: &mut String, safe_links: &[S]) {
    if safe_links
        .iter()
        .any(|prefix| starts_with_ignore_case(url.as_str(), prefix.as_ref()))
    {
        return;
    }
    if url.contains(':') {
        *url = url.replace(':', "%3A");
    }
}

/// `[A-Za-z0-9][A-Za-z0-9_-]*`
fn is_good_attribute(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.first().is_some_and(u8::is_ascii_alphanumeric)
        && bytes[1..]
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[inline]
fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
