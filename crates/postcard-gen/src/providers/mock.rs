//! Mock provider for offline use and testing
//!
//! Generates solid-color PNGs sized after the requested aspect ratio, and
//! "edits" by hue-rotating the source image. No network calls.

use image::{DynamicImage, ImageFormat, RgbaImage};
use postcard_core::{AspectRatio, DataUri, ImageSize, PostcardError, Result};
use std::io::Cursor;

use crate::config::Credential;
use crate::provider::{EditRequest, GenerateRequest, ImageProvider};

/// A provider that produces placeholder images locally
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn requires_credential(&self) -> bool {
        false
    }

    fn generate(&self, request: &GenerateRequest, _credential: Option<&Credential>) -> Result<DataUri> {
        let (width, height) = mock_dimensions(request.size, request.aspect_ratio);
        let hash = text_hash(&request.prompt);
        let color = [(hash >> 16) as u8, (hash >> 8) as u8, hash as u8, 255];

        let img = RgbaImage::from_pixel(width, height, image::Rgba(color));
        encode_png(&DynamicImage::ImageRgba8(img))
    }

    fn edit(&self, request: &EditRequest, _credential: Option<&Credential>) -> Result<DataUri> {
        let bytes = request.image.decode_bytes()?;
        let source = image::load_from_memory(&bytes).map_err(|e| {
            PostcardError::Upstream(format!("mock edit could not read source image: {}", e))
        })?;

        let degrees = (text_hash(&request.instruction) % 300) as i32 + 30;
        encode_png(&source.huerotate(degrees))
    }
}

/// Small stand-in dimensions: 64/128/256 px on the long edge
fn mock_dimensions(size: ImageSize, ratio: AspectRatio) -> (u32, u32) {
    let long_edge = match size {
        ImageSize::OneK => 64,
        ImageSize::TwoK => 128,
        ImageSize::FourK => 256,
    };
    let (w, h) = ratio.terms();
    if w >= h {
        (long_edge, (long_edge * h / w).max(1))
    } else {
        ((long_edge * w / h).max(1), long_edge)
    }
}

fn text_hash(text: &str) -> u32 {
    text.bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
}

fn encode_png(img: &DynamicImage) -> Result<DataUri> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| PostcardError::Upstream(format!("mock could not encode PNG: {}", e)))?;
    Ok(DataUri::from_bytes("image/png", &buf.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_generate_produces_decodable_png() {
        let uri = MockProvider::new()
            .generate(
                &GenerateRequest {
                    prompt: "a red cube".to_string(),
                    size: ImageSize::OneK,
                    aspect_ratio: AspectRatio::Landscape16x9,
                },
                None,
            )
            .unwrap();

        assert!(uri.as_str().starts_with("data:image/png;base64,"));
        let img = image::load_from_memory(&uri.decode_bytes().unwrap()).unwrap();
        assert_eq!(img.dimensions(), (64, 36));
    }

    #[test]
    fn test_edit_round_trips_through_png() {
        let provider = MockProvider::new();
        let original = provider
            .generate(
                &GenerateRequest {
                    prompt: "sky".to_string(),
                    size: ImageSize::OneK,
                    aspect_ratio: AspectRatio::Portrait3x4,
                },
                None,
            )
            .unwrap();

        let edited = provider
            .edit(
                &EditRequest {
                    image: original.clone(),
                    instruction: "make it blue".to_string(),
                },
                None,
            )
            .unwrap();
        assert_ne!(edited, original);
        let img = image::load_from_memory(&edited.decode_bytes().unwrap()).unwrap();
        assert_eq!(img.dimensions(), (48, 64));
    }

    #[test]
    fn test_edit_rejects_garbage() {
        let result = MockProvider::new().edit(
            &EditRequest {
                image: DataUri::from_bytes("image/png", b"not a png"),
                instruction: "x".to_string(),
            },
            None,
        );
        assert!(matches!(result, Err(PostcardError::Upstream(_))));
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(mock_dimensions(ImageSize::FourK, AspectRatio::Square), (256, 256));
        assert_eq!(mock_dimensions(ImageSize::TwoK, AspectRatio::Portrait9x16), (72, 128));
    }
}
