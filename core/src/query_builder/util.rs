use crate::query_builder::Syntax;
use std::ops::Range;

/// A run of a compiled template. Ranges are byte offsets into the template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(Range<usize>),
    /// The name of a `:name` placeholder, without the colon.
    Param(Range<usize>),
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn ident_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !is_ident_char(*b))
        .map_or(bytes.len(), |n| start + n)
}

/// Split `sql` into literal text and `:name` placeholders.
///
/// All delimiters are ASCII, so every offset produced here falls on a char boundary.
pub(crate) fn scan_placeholders(sql: &str, syntax: Syntax) -> Vec<Segment> {
    let bytes = sql.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b':' => {
                // `::` is a cast, never a marker
                if bytes.get(i + 1) == Some(&b':') {
                    i += 2;
                    continue;
                }
                let name_start = i + 1;
                if bytes.get(name_start).is_some_and(|b| is_ident_start(*b)) {
                    let name_end = ident_end(bytes, name_start);
                    if text_start < i {
                        segments.push(Segment::Text(text_start..i));
                    }
                    segments.push(Segment::Param(name_start..name_end));
                    i = name_end;
                    text_start = i;
                } else {
                    i += 1;
                }
            }
            _ if syntax == Syntax::Plain => i += 1,
            b'\'' => {
                let escapes = i > 0 && matches!(bytes[i - 1], b'E' | b'e') && (i < 2 || !is_ident_char(bytes[i - 2]));
                i = skip_quoted(bytes, i, escapes);
            }
            b'"' => i = skip_quoted(bytes, i, false),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
            b'$' => i = skip_dollar_quoted(bytes, i),
            _ => i += 1,
        }
    }
    if text_start < bytes.len() {
        segments.push(Segment::Text(text_start..bytes.len()));
    }
    segments
}

/// `start` is the opening quote. A doubled quote is an escaped quote.
fn skip_quoted(bytes: &[u8], start: usize, backslash_escapes: bool) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
            continue;
        }
        if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |n| start + n + 1)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Skips `$$...$$` and `$tag$...$tag$`. Anything else starting with `$` (e.g. `$1`) is one byte.
fn skip_dollar_quoted(bytes: &[u8], start: usize) -> usize {
    // `$` inside an identifier, as in `foo$bar`
    if start > 0 && is_ident_char(bytes[start - 1]) {
        return start + 1;
    }
    let mut tag_end = start + 1;
    if bytes.get(tag_end).is_some_and(|b| is_ident_start(*b)) {
        tag_end = ident_end(bytes, tag_end);
    }
    if bytes.get(tag_end) != Some(&b'$') {
        return start + 1;
    }
    let delimiter = &bytes[start..=tag_end];
    let body = tag_end + 1;
    bytes[body..]
        .windows(delimiter.len())
        .position(|w| w == delimiter)
        .map_or(bytes.len(), |n| body + n + delimiter.len())
}
