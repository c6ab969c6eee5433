//! Builders and readers for Notion property values.
//!
//! Text properties are arrays of rich text segments. Each segment carries at
//! most [`MAX_SEGMENT_CHARS`] characters, so longer values are split on write
//! and joined back on read.

use serde_json::{Value, json};

/// Maximum characters per rich text segment accepted by the API.
pub const MAX_SEGMENT_CHARS: usize = 2000;

/// Builds a `rich_text` property value.
#[must_use]
pub fn rich_text(content: &str) -> Value {
    json!({ "rich_text": segments(content) })
}

/// Builds a `title` property value.
#[must_use]
pub fn title(content: &str) -> Value {
    json!({ "title": segments(content) })
}

/// Builds a `date` property value from an ISO-8601 start instant.
#[must_use]
pub fn date(start: &str) -> Value {
    json!({ "date": { "start": start } })
}

/// Reads the text of a `title` or `rich_text` property.
///
/// Returns `None` if the property has neither array or the array is empty.
#[must_use]
pub fn plain_text(property: &Value) -> Option<String> {
    let parts = property
        .get("title")
        .or_else(|| property.get("rich_text"))?
        .as_array()?;

    if parts.is_empty() {
        return None;
    }

    let mut text = String::new();
    for part in parts {
        let content = part
            .pointer("/text/content")
            .or_else(|| part.get("plain_text"))
            .and_then(Value::as_str)?;
        text.push_str(content);
    }
    Some(text)
}

/// Reads the start instant of a `date` property.
#[must_use]
pub fn date_start(property: &Value) -> Option<&str> {
    property.pointer("/date/start").and_then(Value::as_str)
}

fn segments(content: &str) -> Vec<Value> {
    if content.is_empty() {
        return vec![json!({ "text": { "content": "" } })];
    }

    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(MAX_SEGMENT_CHARS)
        .map(|chunk| {
            let piece: String = chunk.iter().collect();
            json!({ "text": { "content": piece } })
        })
        .collect()
}
