//! Error types for Postcard Studio

use thiserror::Error;

/// Upstream text identifying a credential that no longer resolves
pub const STALE_CREDENTIAL_MARKER: &str = "Requested entity was not found";

/// The main error type for Postcard operations
#[derive(Debug, Error)]
pub enum PostcardError {
    /// No credential was supplied explicitly or through configuration
    #[error("API key is missing. Pass --api-key or set POSTCARD_API_KEY")]
    MissingCredential,

    /// The upstream service answered, but without any inline image
    #[error("No image data returned from the image service")]
    NoImageReturned,

    /// Transport or service failure; carries the upstream text unmodified
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Failed to decode '{name}': {reason}")]
    Decode { name: String, reason: String },

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The asset is still a placeholder with no payload to send
    #[error("Image has no data yet")]
    ImageNotReady,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Which panel an error is surfaced in; selects the generic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Edit,
}

impl PostcardError {
    /// True when the upstream text says the credential reference is stale.
    pub fn is_credential_stale(&self) -> bool {
        match self {
            PostcardError::Upstream(text) => text.contains(STALE_CREDENTIAL_MARKER),
            _ => false,
        }
    }

    /// Simplified text for end users. Raw upstream text never leaks through here.
    pub fn user_message(&self, action: Action) -> &'static str {
        match self {
            PostcardError::MissingCredential => {
                "An API key is required. Please select or enter a key and try again."
            }
            err if err.is_credential_stale() => "API Key issue detected. Please try again.",
            PostcardError::InvalidInput(_) => "Please enter a description first.",
            PostcardError::ImageNotReady => "This photo is still loading. Please try again in a moment.",
            _ => match action {
                Action::Generate => "Failed to generate image. Try a simpler prompt.",
                Action::Edit => "Failed to process image. Please try a different prompt.",
            },
        }
    }
}

/// Result type alias for Postcard operations
pub type Result<T> = std::result::Result<T, PostcardError>;

impl From<toml::de::Error> for PostcardError {
    fn from(err: toml::de::Error) -> Self {
        PostcardError::TomlParse(err.to_string())
    }
}
