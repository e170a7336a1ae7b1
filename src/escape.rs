//! XML escaping utilities.
//!
//! Pure functions that convert raw text, attribute values and comment
//! content into XML-safe output. All of them are total and allocation-free
//! when the input needs no rewriting.

use std::borrow::Cow;

use memchr::{memchr2, memchr3, memmem};

/// Escapes text content: `&` and `<` become entity references.
///
/// `>` and `"` are left alone, they are valid in character data.
/// Returns a borrowed value when no replacement is needed.
#[inline]
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if memchr2(b'&', b'<', value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + value.len() / 8);
    let mut start = 0;
    for (i, byte) in value.bytes().enumerate() {
        let replacement = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => continue,
        };
        // only ASCII bytes are replaced, so slicing stays on char boundaries
        out.push_str(&value[start..i]);
        out.push_str(replacement);
        start = i + 1;
    }
    out.push_str(&value[start..]);
    Cow::Owned(out)
}

/// Escapes an attribute value and wraps it in double quotes.
///
/// `&`, `<` and `"` become entity references; the result always carries the
/// surrounding quotes, so it can be written after `name=` as-is.
#[inline]
pub fn escape_attr(value: &str) -> String {
    if memchr3(b'&', b'<', b'"', value.as_bytes()).is_none() {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        out.push_str(value);
        out.push('"');
        return out;
    }

    let mut out = String::with_capacity(value.len() + value.len() / 8 + 2);
    out.push('"');
    let mut start = 0;
    for (i, byte) in value.bytes().enumerate() {
        let replacement = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'"' => "&quot;",
            _ => continue,
        };
        out.push_str(&value[start..i]);
        out.push_str(replacement);
        start = i + 1;
    }
    out.push_str(&value[start..]);
    out.push('"');
    out
}

/// Removes every `--` sequence from comment content.
///
/// XML forbids `--` inside comments, so the pair is dropped rather than
/// escaped. Returns a borrowed value when the input contains none.
#[inline]
pub fn sanitize_comment(value: &str) -> Cow<'_, str> {
    let finder = memmem::Finder::new(b"--");
    if finder.find(value.as_bytes()).is_none() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut start = 0;
    // find_iter yields non-overlapping matches, so each starts at or past
    // the end of the previous pair
    for pos in finder.find_iter(value.as_bytes()) {
        out.push_str(&value[start..pos]);
        start = pos + 2;
    }
    out.push_str(&value[start..]);
    Cow::Owned(out)
}
