//! Assets and the user's current selections

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data_uri::DataUri;
use crate::error::PostcardError;
use crate::id::AssetId;

/// Maximum number of prompt characters kept in a generated asset's name
const GENERATED_NAME_PROMPT_CHARS: usize = 15;

/// One user-visible photo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAsset {
    pub id: AssetId,
    /// Display label: original filename, or a label synthesized from a prompt
    pub name: String,
    /// Unedited payload, empty until an upload finishes decoding
    pub original_data: DataUri,
    /// Payload currently shown; equals `original_data` until edited
    pub current_data: DataUri,
    /// True from placeholder creation until decoding completes
    pub is_processing: bool,
}

impl ImageAsset {
    /// A placeholder for an upload whose bytes are still being read
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            original_data: DataUri::empty(),
            current_data: DataUri::empty(),
            is_processing: true,
        }
    }

    /// A fully populated asset produced by the generation service
    pub fn generated(data: DataUri, prompt: &str) -> Self {
        let short: String = prompt.chars().take(GENERATED_NAME_PROMPT_CHARS).collect();
        Self {
            id: AssetId::new(),
            name: format!("AI Generated: {}...", short),
            original_data: data.clone(),
            current_data: data,
            is_processing: false,
        }
    }

    /// Whether an edit has replaced the original payload
    pub fn is_edited(&self) -> bool {
        self.current_data != self.original_data
    }
}

/// Physical postcard formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PostcardSize {
    #[default]
    #[serde(rename = "4x6")]
    Size4x6,
    #[serde(rename = "5x7")]
    Size5x7,
    #[serde(rename = "6x9")]
    Size6x9,
    #[serde(rename = "6x11")]
    Size6x11,
}

/// Presentation data for a postcard size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConfig {
    pub label: &'static str,
    /// width / height in portrait orientation
    pub ratio: f64,
    pub description: &'static str,
}

impl PostcardSize {
    pub const ALL: [PostcardSize; 4] = [
        PostcardSize::Size4x6,
        PostcardSize::Size5x7,
        PostcardSize::Size6x9,
        PostcardSize::Size6x11,
    ];

    pub fn config(&self) -> SizeConfig {
        match self {
            PostcardSize::Size4x6 => SizeConfig {
                label: "4\" x 6\" Standard",
                ratio: 4.0 / 6.0,
                description: "The classic standard postcard size.",
            },
            PostcardSize::Size5x7 => SizeConfig {
                label: "5\" x 7\" Large",
                ratio: 5.0 / 7.0,
                description: "Great for framing and detailed photos.",
            },
            PostcardSize::Size6x9 => SizeConfig {
                label: "6\" x 9\" Oversized",
                ratio: 6.0 / 9.0,
                description: "High impact, maximum visibility.",
            },
            PostcardSize::Size6x11 => SizeConfig {
                label: "6\" x 11\" Panoramic",
                ratio: 6.0 / 11.0,
                description: "Perfect for wide landscapes or storyboards.",
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostcardSize::Size4x6 => "4x6",
            PostcardSize::Size5x7 => "5x7",
            PostcardSize::Size6x9 => "6x9",
            PostcardSize::Size6x11 => "6x11",
        }
    }
}

impl fmt::Display for PostcardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostcardSize {
    type Err = PostcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostcardSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                PostcardError::InvalidInput(format!(
                    "unknown postcard size '{}'. Available: 4x6, 5x7, 6x9, 6x11",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl Orientation {
    /// The aspect ratio requested from the generator for this orientation
    pub fn generation_aspect_ratio(&self) -> AspectRatio {
        match self {
            Orientation::Landscape => AspectRatio::Landscape16x9,
            Orientation::Portrait => AspectRatio::Portrait9x16,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = PostcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(PostcardError::InvalidInput(format!(
                "unknown orientation '{}'. Available: portrait, landscape",
                other
            ))),
        }
    }
}

/// Where new photos come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Upload,
    Generate,
}

/// Target resolution for generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = PostcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(ImageSize::OneK),
            "2K" => Ok(ImageSize::TwoK),
            "4K" => Ok(ImageSize::FourK),
            _ => Err(PostcardError::InvalidInput(format!(
                "unknown image size '{}'. Available: 1K, 2K, 4K",
                s
            ))),
        }
    }
}

/// Aspect ratios accepted by the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait3x4,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape16x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
        }
    }

    /// (width, height) terms of the ratio
    pub fn terms(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Portrait3x4 => (3, 4),
            AspectRatio::Landscape4x3 => (4, 3),
            AspectRatio::Portrait9x16 => (9, 16),
            AspectRatio::Landscape16x9 => (16, 9),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = PostcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == s.trim())
            .ok_or_else(|| {
                PostcardError::InvalidInput(format!(
                    "unknown aspect ratio '{}'. Available: 1:1, 3:4, 4:3, 9:16, 16:9",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_processing_and_empty() {
        let asset = ImageAsset::placeholder("a.png");
        assert_eq!(asset.name, "a.png");
        assert!(asset.is_processing);
        assert!(asset.original_data.is_empty());
        assert!(asset.current_data.is_empty());
        assert!(!asset.is_edited());
    }

    #[test]
    fn test_generated_asset_name_is_truncated() {
        let data = DataUri::new("data:image/png;base64,AAAA");
        let asset = ImageAsset::generated(data.clone(), "a futuristic city made of candy");
        assert_eq!(asset.name, "AI Generated: a futuristic ci...");
        assert_eq!(asset.original_data, data);
        assert_eq!(asset.current_data, data);
        assert!(!asset.is_processing);

        let short = ImageAsset::generated(data, "cube");
        assert_eq!(short.name, "AI Generated: cube...");
    }

    #[test]
    fn test_orientation_maps_to_generation_ratio() {
        assert_eq!(
            Orientation::Landscape.generation_aspect_ratio(),
            AspectRatio::Landscape16x9
        );
        assert_eq!(
            Orientation::Portrait.generation_aspect_ratio(),
            AspectRatio::Portrait9x16
        );
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!("6x11".parse::<PostcardSize>().unwrap(), PostcardSize::Size6x11);
        assert_eq!("2k".parse::<ImageSize>().unwrap(), ImageSize::TwoK);
        assert_eq!("3:4".parse::<AspectRatio>().unwrap(), AspectRatio::Portrait3x4);
        assert_eq!("Portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert!("8x10".parse::<PostcardSize>().is_err());
        assert!("2:1".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_serde_names_match_wire_format() {
        assert_eq!(serde_json::to_string(&ImageSize::FourK).unwrap(), "\"4K\"");
        assert_eq!(
            serde_json::to_string(&AspectRatio::Landscape16x9).unwrap(),
            "\"16:9\""
        );
        assert_eq!(serde_json::to_string(&PostcardSize::Size5x7).unwrap(), "\"5x7\"");
    }

    #[test]
    fn test_size_configs() {
        let cfg = PostcardSize::Size4x6.config();
        assert!((cfg.ratio - 4.0 / 6.0).abs() < f64::EPSILON);
        assert_eq!(PostcardSize::default(), PostcardSize::Size4x6);
        assert_eq!(Orientation::default(), Orientation::Landscape);
    }
}
