//! Response parsing shared by generation and editing

use postcard_core::{DataUri, PostcardError, Result};
use serde_json::Value;

/// Every returned image is labelled as PNG
pub const DEFAULT_OUTPUT_MIME: &str = "image/png";

/// Pull the inline image out of a `generateContent` response.
///
/// Only the first candidate is read. Its first part carrying non-empty inline
/// data wins and is returned as a PNG data URI. A response without one is
/// `NoImageReturned`; an embedded `error` object is `Upstream` with its text
/// left intact.
pub fn extract_first_image(response: &Value) -> Result<DataUri> {
    if let Some(error) = response.get("error") {
        return Err(PostcardError::Upstream(error.to_string()));
    }

    let parts = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array);

    for part in parts.into_iter().flatten() {
        let data = part
            .get("inlineData")
            .or_else(|| part.get("inline_data"))
            .and_then(|inline| inline.get("data"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !data.is_empty() {
            return Ok(DataUri::from_base64(DEFAULT_OUTPUT_MIME, data));
        }
    }

    if let Some(reason) = response
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(Value::as_str)
    {
        log::info!("Upstream blocked the prompt: {}", reason);
    }
    Err(PostcardError::NoImageReturned)
}

/// Parse a raw response body, for tests and offline inspection
pub fn parse_image_response(json: &str) -> Result<DataUri> {
    let response: Value = serde_json::from_str(json)
        .map_err(|e| PostcardError::Upstream(format!("Invalid JSON: {}", e)))?;
    extract_first_image(&response)
}
