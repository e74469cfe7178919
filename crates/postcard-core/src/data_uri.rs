//! Base64 data-URI image payloads

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PostcardError, Result};

/// An image payload of the form `data:<mime>;base64,<payload>`.
///
/// The empty value marks a placeholder whose bytes have not arrived yet.
/// Construction from a raw string is unchecked: payloads handed back by the
/// browser-style file reader or the upstream service are stored verbatim.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap an existing string without validating it
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encode raw image bytes under the given MIME type
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
    }

    /// Wrap an already base64-encoded payload
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, payload))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// MIME type from an `image/<letters>` prefix, if the prefix is present
    pub fn mime_type(&self) -> Option<&str> {
        self.split_prefix().map(|(mime, _)| mime)
    }

    /// The base64 body with any `data:image/...;base64,` prefix stripped
    pub fn payload(&self) -> &str {
        match self.split_prefix() {
            Some((_, payload)) => payload,
            None => &self.0,
        }
    }

    /// Decode the base64 body into raw bytes
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        if self.is_empty() {
            return Err(PostcardError::InvalidDataUri("payload is empty".to_string()));
        }
        BASE64
            .decode(self.payload().as_bytes())
            .map_err(|e| PostcardError::InvalidDataUri(e.to_string()))
    }

    /// Length of the encoded string in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn split_prefix(&self) -> Option<(&str, &str)> {
        let rest = self.0.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        let subtype = mime.strip_prefix("image/")?;
        if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some((mime, payload))
    }
}

impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mime_type() {
            Some(mime) => write!(f, "DataUri({}, {} bytes)", mime, self.0.len()),
            None if self.is_empty() => write!(f, "DataUri(empty)"),
            None => write!(f, "DataUri(raw, {} bytes)", self.0.len()),
        }
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DataUri {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_detection() {
        let uri = DataUri::new("data:image/webp;base64,UklGRg==");
        assert_eq!(uri.mime_type(), Some("image/webp"));
        assert_eq!(uri.payload(), "UklGRg==");
    }

    #[test]
    fn test_raw_base64_has_no_mime() {
        let uri = DataUri::new("iVBORw0KGgo=");
        assert_eq!(uri.mime_type(), None);
        assert_eq!(uri.payload(), "iVBORw0KGgo=");
    }

    #[test]
    fn test_non_image_prefix_is_not_stripped() {
        let uri = DataUri::new("data:text/plain;base64,aGk=");
        assert_eq!(uri.mime_type(), None);
        assert_eq!(uri.payload(), "data:text/plain;base64,aGk=");

        let svg = DataUri::new("data:image/svg+xml;base64,PHN2Zz4=");
        assert_eq!(svg.mime_type(), None);
    }

    #[test]
    fn test_from_bytes_decodes_back() {
        let uri = DataUri::from_bytes("image/png", &[0x89, b'P', b'N', b'G']);
        assert!(uri.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(uri.decode_bytes().unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_empty_placeholder() {
        let uri = DataUri::empty();
        assert!(uri.is_empty());
        assert!(uri.decode_bytes().is_err());
        assert_eq!(format!("{:?}", uri), "DataUri(empty)");
    }

    #[test]
    fn test_serde_is_transparent() {
        let uri = DataUri::new("data:image/png;base64,AAAA");
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"data:image/png;base64,AAAA\"");
    }
}
