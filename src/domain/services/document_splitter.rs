use serde_json::{error::Category, Deserializer, Value};

use crate::domain::errors::SplitError;

const LITERALS: [&str; 3] = ["true", "false", "null"];

/// The first JSON value of a body and whatever followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument {
    pub value: Value,
    /// Remainder after the value, whitespace-trimmed; `None` when nothing is left.
    pub remainder: Option<String>,
}

impl SplitDocument {
    /// Remainder cut down to `max_bytes` for diagnostics.
    pub fn trailing_preview(&self, max_bytes: usize) -> Option<String> {
        self.remainder
            .as_deref()
            .map(|rest| truncate_bytes(rest, max_bytes).to_string())
    }
}

/// Decode exactly one JSON value from the front of `body`.
///
/// Leading and trailing whitespace is ignored. Anything after the first value
/// is returned untouched as the remainder and never decoded, including junk
/// glued directly onto a bare number or literal (`123abc`).
pub fn split_first_document(body: &str) -> Result<SplitDocument, SplitError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(SplitError::EmptyBody);
    }

    let (value, consumed) = decode_first_value(trimmed)?;

    let rest = trimmed[consumed..].trim();
    let remainder = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };

    Ok(SplitDocument { value, remainder })
}

/// First value of `text` and the byte offset just past it.
fn decode_first_value(text: &str) -> Result<(Value, usize), SplitError> {
    let mut stream = Deserializer::from_str(text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok((value, stream.byte_offset())),
        None => Err(SplitError::EmptyBody),
        Some(Err(e)) => {
            // The stream decoder wants a delimiter after a scalar; retry on the
            // scalar token alone so the rest becomes trailing data.
            if e.classify() == Category::Syntax {
                if let Some(end) = scalar_prefix_len(text).filter(|&end| end < text.len()) {
                    if let Ok(value) = serde_json::from_str::<Value>(&text[..end]) {
                        return Ok((value, end));
                    }
                }
            }
            Err(SplitError::Malformed(e))
        }
    }
}

/// Length of the JSON number or literal token at the start of `text`.
fn scalar_prefix_len(text: &str) -> Option<usize> {
    if let Some(literal) = LITERALS.iter().find(|lit| text.starts_with(**lit)) {
        return Some(literal.len());
    }

    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits_from(i + 1),
        _ => return None,
    }
    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i = digits_from(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            i = digits_from(j);
        }
    }
    Some(i)
}

/// Longest prefix of `text` that fits in `max_bytes` without splitting a char.
pub fn truncate_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    &text[..cut]
}
