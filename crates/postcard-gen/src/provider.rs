//! Image provider trait and request types

use postcard_core::{AspectRatio, DataUri, ImageSize, Result};
use serde::{Deserialize, Serialize};

use crate::config::Credential;

/// MIME type assumed for edit inputs that carry no data-URI prefix
pub const DEFAULT_EDIT_MIME: &str = "image/jpeg";

/// A text-to-image request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub aspect_ratio: AspectRatio,
}

/// An image-to-image request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub image: DataUri,
    pub instruction: String,
}

/// Image bytes as sent upstream: bare base64 plus its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Split a data URI into MIME type and bare payload.
    ///
    /// Inputs without an `data:image/...;base64,` prefix are taken as raw
    /// base64 and labelled `image/jpeg`.
    pub fn from_data_uri(uri: &DataUri) -> Self {
        Self {
            mime_type: uri.mime_type().unwrap_or(DEFAULT_EDIT_MIME).to_string(),
            data: uri.payload().to_string(),
        }
    }
}

impl EditRequest {
    pub fn inline_image(&self) -> InlineImage {
        InlineImage::from_data_uri(&self.image)
    }
}

/// Trait implemented by each upstream image service (Gemini, Mock)
pub trait ImageProvider: Send + Sync {
    /// Provider name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Whether calls must carry a credential
    fn requires_credential(&self) -> bool {
        true
    }

    /// Produce a new image from a text prompt
    fn generate(&self, request: &GenerateRequest, credential: Option<&Credential>) -> Result<DataUri>;

    /// Transform an existing image according to an instruction
    fn edit(&self, request: &EditRequest, credential: Option<&Credential>) -> Result<DataUri>;
}
