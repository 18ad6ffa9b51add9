//! One escaping function per embedding construct.
//!
//! - Template literals (`` `...` ``) carry query text and are escaped by
//!   [`template_literal`] so the cooked string equals the input exactly.
//! - Single-quoted literals carry short identifiers, URLs and check names.
//! - Double-quoted literals carry chai assertion messages (JSON string syntax,
//!   which is valid JavaScript).

use serde_json::Value;

/// Escape `text` for the body of a JavaScript template literal.
///
/// Only the backslash, the backtick and the `${` interpolation opener are
/// escaped. Everything else, including newlines, passes through verbatim.
#[must_use]
pub fn template_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`template_literal`] for the escapes it produces.
///
/// Any other escape sequence is kept as written.
#[must_use]
pub fn unescape_template_literal(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('\\' | '`' | '$')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Quote `text` as a single-quoted JavaScript string literal.
#[must_use]
pub fn single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(ch))),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

/// Quote `text` as a double-quoted JavaScript string literal.
#[must_use]
pub fn double_quoted(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
