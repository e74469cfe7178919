//! Generation and edit clients
//!
//! Stateless wrappers around an [`ImageProvider`]: they validate input,
//! resolve the credential (explicit argument first, then the configured
//! default) and hand the request to the provider. A missing credential fails
//! before anything is sent. Errors are returned to the caller untouched.

use postcard_core::{AspectRatio, DataUri, ImageSize, PostcardError, Result};

use crate::config::{Credential, PostcardConfig};
use crate::provider::{EditRequest, GenerateRequest, ImageProvider};
use crate::providers::create_provider;

pub struct ImageClient {
    provider: Box<dyn ImageProvider>,
    default_credential: Option<Credential>,
}

impl ImageClient {
    pub fn new(provider: Box<dyn ImageProvider>, default_credential: Option<Credential>) -> Self {
        Self {
            provider,
            default_credential,
        }
    }

    /// Build a client for the configured provider, or `provider_override`
    pub fn from_config(config: &PostcardConfig, provider_override: Option<&str>) -> Result<Self> {
        let name = provider_override.unwrap_or_else(|| config.provider_name());
        let provider = create_provider(name, config)?;
        Ok(Self::new(provider, config.credential()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate an image from `prompt`
    pub fn generate(
        &self,
        prompt: &str,
        size: ImageSize,
        aspect_ratio: AspectRatio,
        credential: Option<&str>,
    ) -> Result<DataUri> {
        if prompt.trim().is_empty() {
            return Err(PostcardError::InvalidInput("prompt is empty".to_string()));
        }
        let credential = self.resolve_credential(credential)?;

        let request = GenerateRequest {
            prompt: prompt.to_string(),
            size,
            aspect_ratio,
        };
        self.provider
            .generate(&request, credential.as_ref())
            .inspect_err(|e| log::warn!("Image generation failed: {}", e))
    }

    /// Apply `instruction` to `image`, returning the transformed image
    pub fn edit(&self, image: &DataUri, instruction: &str, credential: Option<&str>) -> Result<DataUri> {
        if instruction.trim().is_empty() {
            return Err(PostcardError::InvalidInput("instruction is empty".to_string()));
        }
        if image.is_empty() {
            return Err(PostcardError::ImageNotReady);
        }
        let credential = self.resolve_credential(credential)?;

        let request = EditRequest {
            image: image.clone(),
            instruction: instruction.to_string(),
        };
        self.provider
            .edit(&request, credential.as_ref())
            .inspect_err(|e| log::warn!("Image edit failed: {}", e))
    }

    fn resolve_credential(&self, explicit: Option<&str>) -> Result<Option<Credential>> {
        let credential = explicit
            .and_then(Credential::new)
            .or_else(|| self.default_credential.clone());

        if credential.is_none() && self.provider.requires_credential() {
            return Err(PostcardError::MissingCredential);
        }
        Ok(credential)
    }
}
