//! Pipe-delimited rendering of [`CertificateRecord`]s.
//!
//! Absent fields render as zero characters between delimiters. Free-text
//! values have `\` and `|` backslash-escaped, so every line has exactly one
//! column per field name regardless of content.

use super::{CertificateRecord, FieldValue};

pub const DELIMITER: char = '|';
const ESCAPE: char = '\\';

/// Renders the header line: the field names joined by the delimiter.
pub fn header(field_order: &[&str]) -> String {
    field_order.join(&DELIMITER.to_string())
}

/// Renders one record in `field_order`, leaving absent fields empty.
pub fn serialize(record: &CertificateRecord, field_order: &[&str]) -> String {
    field_order
        .iter()
        .map(|name| record.get(name).map(render_value).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => escape_text(text),
        other => other.to_string(),
    }
}

/// Backslash-escapes the escape character and the delimiter.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == ESCAPE || c == DELIMITER {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Reverses [`escape_text`]: every backslash makes the next character literal.
pub fn unescape_text(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(next) = chars.next() {
                unescaped.push(next);
            }
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}

/// Splits a serialized line into its columns on unescaped delimiters.
///
/// Columns are returned as written, escapes included.
pub fn split_row(line: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            DELIMITER => columns.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    columns.push(current);
    columns
}
