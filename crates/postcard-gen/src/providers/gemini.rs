//! Gemini image provider (Google Generative Language API)
//!
//! Both operations go through `models/{model}:generateContent`. Generation
//! sends a single text part plus an image config; editing sends the source
//! image inline followed by the instruction and asks for image-only output.

use postcard_core::{DataUri, PostcardError, Result};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::{Credential, PostcardConfig};
use crate::provider::{EditRequest, GenerateRequest, ImageProvider};
use crate::response::extract_first_image;
use crate::transport::{HttpTransport, Transport};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiProvider {
    transport: Arc<dyn Transport>,
    api_url: String,
    generate_model: String,
    edit_model: String,
}

impl GeminiProvider {
    /// Create a provider that talks HTTP to the configured endpoint
    pub fn from_config(config: &PostcardConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(config: &PostcardConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_url: config.api_url().trim_end_matches('/').to_string(),
            generate_model: config.generate_model().to_string(),
            edit_model: config.edit_model().to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent", self.api_url, model_path)
    }

    fn call(&self, model: &str, body: &Value, credential: Option<&Credential>) -> Result<DataUri> {
        let credential = credential.ok_or(PostcardError::MissingCredential)?;
        let url = self.endpoint(model);
        log::info!("POST {}", url);

        let response = self
            .transport
            .post_json(&url, &[(API_KEY_HEADER, credential.expose())], body)?;
        extract_first_image(&response)
    }
}

/// Request body for text-to-image
pub fn generate_body(request: &GenerateRequest) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }]
        }],
        "generationConfig": {
            "imageConfig": {
                "aspectRatio": request.aspect_ratio.as_str(),
                "imageSize": request.size.as_str()
            }
        }
    })
}

/// Request body for image-to-image
pub fn edit_body(request: &EditRequest) -> Value {
    let inline = request.inline_image();
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                {
                    "inlineData": {
                        "mimeType": inline.mime_type,
                        "data": inline.data
                    }
                },
                { "text": request.instruction }
            ]
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE"]
        }
    })
}

impl ImageProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, request: &GenerateRequest, credential: Option<&Credential>) -> Result<DataUri> {
        self.call(&self.generate_model, &generate_body(request), credential)
    }

    fn edit(&self, request: &EditRequest, credential: Option<&Credential>) -> Result<DataUri> {
        self.call(&self.edit_model, &edit_body(request), credential)
    }
}
