//! Bracket matching over TypeScript source that skips strings and comments.

/// Byte index of the bracket closing the one at `open`.
///
/// `open` must index an opening `[`, `{` or `(`. Brackets inside string,
/// template and comment text are ignored. Returns `None` when the source ends
/// before the bracket is closed.
pub(crate) fn matching_close(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut stack = vec![closer(*bytes.get(open)?)?];
    let mut index = open + 1;

    while index < bytes.len() {
        let byte = bytes[index];
        match byte {
            b'"' | b'\'' | b'`' => index = skip_string(bytes, index)?,
            b'/' if bytes.get(index + 1) == Some(&b'/') => {
                index = bytes[index..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |offset| index + offset);
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                index = source[index + 2..]
                    .find("*/")
                    .map(|offset| index + 2 + offset + 1)?;
            }
            b'[' | b'{' | b'(' => stack.push(closer(byte)?),
            b']' | b'}' | b')' => {
                if stack.pop()? != byte {
                    return None;
                }
                if stack.is_empty() {
                    return Some(index);
                }
            }
            _ => {}
        }
        index += 1;
    }
    None
}

/// Byte index of the last character of `source` that is neither whitespace
/// nor comment text. A string literal counts through its closing quote.
pub(crate) fn last_code_byte(source: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut last = None;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'"' | b'\'' | b'`' => {
                index = skip_string(bytes, index)?;
                last = Some(index);
            }
            b'/' if bytes.get(index + 1) == Some(&b'/') => {
                index = bytes[index..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |offset| index + offset);
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                index = source[index + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| index + 2 + offset + 1);
            }
            byte if byte.is_ascii_whitespace() => {}
            _ => last = Some(index),
        }
        index += 1;
    }
    last
}

/// Leading whitespace of the line containing byte `index`.
pub(crate) fn line_indent(source: &str, index: usize) -> &str {
    let start = source[..index].rfind('\n').map_or(0, |pos| pos + 1);
    let line = &source[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

const fn closer(open: u8) -> Option<u8> {
    match open {
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        _ => None,
    }
}

/// Index of the quote closing the string that starts at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut index = start + 1;
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            byte if byte == quote => return Some(index),
            _ => {}
        }
        index += 1;
    }
    None
}
