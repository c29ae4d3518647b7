//! Raw HTML tag scanning shared by the block and inline markup recognizers.
//!
//! Attribute grammar: a name `[a-zA-Z_:][\w:.-]*`, optionally followed by
//! `= value` where the value is unquoted, `"…"` or `'…'`. Scanning is greedy
//! and never backtracks.

use crate::cursor::{is_space, is_word_byte, Cursor};

/// Scan one attribute at the cursor. Returns false (cursor untouched) when
/// no attribute name starts here.
pub fn scan_attribute(cursor: &mut Cursor<'_>) -> bool {
    match cursor.peek() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b':' => cursor.bump(),
        _ => return false,
    }
    cursor.skip_while(|b| is_word_byte(b) || matches!(b, b':' | b'.' | b'-'));

    let mut value = *cursor;
    value.skip_whitespace();
    if !value.eat(b'=') {
        return true;
    }
    value.skip_whitespace();
    let matched = match value.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            value.bump();
            match value.find(quote) {
                Some(end) => {
                    value.advance(end + 1 - value.offset());
                    true
                }
                None => false,
            }
        }
        Some(_) => value.skip_while(|b| !is_space(b) && !matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`')) > 0,
        None => false,
    };
    if matched {
        *cursor = value;
    }
    true
}

/// Scan `([ ]*attribute)*[ ]*` and return the cursor after it.
pub fn scan_attributes(cursor: &mut Cursor<'_>) {
    loop {
        let mut attr = *cursor;
        attr.skip_spaces();
        if !scan_attribute(&mut attr) {
            break;
        }
        *cursor = attr;
    }
    cursor.skip_spaces();
}

/// Length of a tag name `\w[\w-]*` at the start of `text`, or 0.
pub fn tag_name_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    if !bytes.first().is_some_and(|&b| is_word_byte(b)) {
        return 0;
    }
    1 + bytes[1..].iter().take_while(|&&b| is_word_byte(b) || b == b'-').count()
}

/// Match `</name[ ]*>` at the start of `text`; returns its length.
pub fn closing_tag(text: &str) -> Option<usize> {
    let rest = text.strip_prefix("</")?;
    let name = tag_name_len(rest);
    if name == 0 {
        return None;
    }
    let mut cursor = Cursor::new_at(text, 2 + name);
    cursor.skip_spaces();
    cursor.eat(b'>').then(|| cursor.offset())
}

/// Match `<name attrs [/]>` at the start of `text`; returns its length.
pub fn opening_tag(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('<')?;
    let name = tag_name_len(rest);
    if name == 0 {
        return None;
    }
    let mut cursor = Cursor::new_at(text, 1 + name);
    scan_attributes(&mut cursor);
    cursor.eat(b'/');
    cursor.eat(b'>').then(|| cursor.offset())
}

/// Match an HTML comment without `--` inside it; returns its length.
pub fn comment(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = "<!--".len();
    if !text.starts_with("<!--") {
        return None;
    }
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }
    match bytes.get(pos) {
        Some(b'>' | b'-') | None => return None,
        Some(_) => pos += 1,
    }
    let close = memchr::memmem::find(&bytes[pos..], b"--")? + pos;
    (bytes.get(close + 2) == Some(&b'>')).then_some(close + 3)
}

/// A block-level tag line: `<` or `</`, a possibly empty `\w*` name,
/// attributes, optional `/`, then `>`. Returns the tag name.
///
/// The name gives back trailing bytes when the full name does not lead to
/// a match, so `<abc=d>` is tag `ab` with attribute `c=d`.
pub fn block_tag(text: &str) -> Option<&str> {
    let mut cursor = Cursor::new(text);
    if !cursor.eat(b'<') {
        return None;
    }
    cursor.eat(b'/');
    let start = cursor.offset();
    let longest = cursor.skip_while(is_word_byte);
    (0..=longest).rev().find_map(|len| {
        let mut tag = Cursor::new_at(text, start + len);
        scan_attributes(&mut tag);
        tag.eat(b'/');
        tag.eat(b'>').then(|| &text[start..start + len])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_tags() {
        assert_eq!(opening_tag("<b>x"), Some(3));
        assert_eq!(opening_tag("<a href=\"x\" title='y'>z"), Some(22));
        assert_eq!(opening_tag("<img src=a.png/>"), Some(16));
        assert_eq!(opening_tag("<br />"), Some(6));
        assert_eq!(opening_tag("<input disabled>"), Some(16));
        assert_eq!(opening_tag("< b>"), None);
        assert_eq!(opening_tag("<a href=\"x>"), None);
    }

    #[test]
    fn test_closing_tags() {
        assert_eq!(closing_tag("</em  >rest"), Some(7));
        assert_eq!(closing_tag("</my-tag>"), Some(9));
        assert_eq!(closing_tag("</ em>"), None);
    }

    #[test]
    fn test_comments() {
        assert_eq!(comment("<!-- hi -->x"), Some(11));
        assert_eq!(comment("<!---x-->"), Some(9));
        assert_eq!(comment("<!-->"), None);
        assert_eq!(comment("<!-- a -- b -->"), None);
        assert_eq!(comment("<!-- open"), None);
    }

    #[test]
    fn test_block_tags() {
        assert_eq!(block_tag("<div class=\"x\">"), Some("div"));
        assert_eq!(block_tag("</DIV>"), Some("DIV"));
        assert_eq!(block_tag("<>"), Some(""));
        assert_eq!(block_tag("<div"), None);
        assert_eq!(block_tag("<abc=d>"), Some("ab"));
    }
}
