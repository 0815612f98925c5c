//! Result text extraction.
//!
//! A completed run carries its answer as
//! `result.data.message.content[]`, a list of content blocks where text blocks
//! have a `text` field.

use serde_json::Value;

use crate::error::RelayError;

/// Concatenate the text of every content block of a completed run result.
///
/// Each block's text is followed by a newline and the whole is trimmed.
/// A missing or wrongly typed level of the nested structure is a
/// [`RelayError::MalformedResult`]; a well-formed result with no text is
/// [`RelayError::EmptyContent`].
pub fn extract_text(result: &Value) -> Result<String, RelayError> {
    let data = object_field(result, "data", "result")?;
    let message = object_field(data, "message", "result.data")?;
    let blocks = match message.get("content") {
        Some(Value::Array(blocks)) => blocks,
        Some(_) => {
            return Err(RelayError::MalformedResult(
                "result.data.message.content is not a list".to_string(),
            ))
        }
        None => {
            return Err(RelayError::MalformedResult(
                "result.data.message.content is missing".to_string(),
            ))
        }
    };

    let mut text = String::new();
    for block in blocks {
        if let Some(part) = block.get("text").and_then(Value::as_str) {
            text.push_str(part);
            text.push('\n');
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RelayError::EmptyContent);
    }
    Ok(trimmed.to_string())
}

fn object_field<'a>(parent: &'a Value, key: &str, path: &str) -> Result<&'a Value, RelayError> {
    if !parent.is_object() {
        return Err(RelayError::MalformedResult(format!(
            "{path} is not an object"
        )));
    }
    match parent.get(key) {
        Some(value) if value.is_object() => Ok(value),
        Some(_) => Err(RelayError::MalformedResult(format!(
            "{path}.{key} is not an object"
        ))),
        None => Err(RelayError::MalformedResult(format!(
            "{path}.{key} is missing"
        ))),
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
