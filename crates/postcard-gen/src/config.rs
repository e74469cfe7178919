//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `POSTCARD_API_KEY` (or `API_KEY`), `POSTCARD_API_URL`,
//!    `POSTCARD_PROVIDER`
//! 2. Project-local: `.postcard/config.toml`
//! 3. Global: `~/.postcard/config.toml`
//!
//! A credential passed explicitly to a client call always beats all three.

use postcard_core::{ImageSize, Orientation, PostcardSize, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GENERATE_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";

/// Secret used to authorize upstream calls. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key; blank strings are treated as no key at all
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Upstream service settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub generate_model: Option<String>,
    #[serde(default)]
    pub edit_model: Option<String>,
}

/// Initial selections for a new session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub size: Option<PostcardSize>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub image_size: Option<ImageSize>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostcardConfigFile {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct PostcardConfig {
    pub provider: ProviderConfig,
    pub defaults: DefaultsConfig,
}

impl PostcardConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = PostcardConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".postcard/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        Ok(config.into())
    }

    /// The process-wide credential, if one is configured
    pub fn credential(&self) -> Option<Credential> {
        self.provider.api_key.clone().and_then(Credential::new)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }

    pub fn api_url(&self) -> &str {
        self.provider.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn generate_model(&self) -> &str {
        self.provider
            .generate_model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATE_MODEL)
    }

    pub fn edit_model(&self) -> &str {
        self.provider.edit_model.as_deref().unwrap_or(DEFAULT_EDIT_MODEL)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".postcard").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<PostcardConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let file: PostcardConfigFile = toml::from_str(&content)
            .inspect_err(|e| log::warn!("Failed to parse config {}: {}", path.display(), e))?;
        Ok(file)
    }

    fn merge_into(base: &mut PostcardConfigFile, overlay: PostcardConfigFile) {
        let p = overlay.provider;
        if p.name.is_some() {
            base.provider.name = p.name;
        }
        if p.api_key.is_some() {
            base.provider.api_key = p.api_key;
        }
        if p.api_url.is_some() {
            base.provider.api_url = p.api_url;
        }
        if p.generate_model.is_some() {
            base.provider.generate_model = p.generate_model;
        }
        if p.edit_model.is_some() {
            base.provider.edit_model = p.edit_model;
        }

        let d = overlay.defaults;
        if d.size.is_some() {
            base.defaults.size = d.size;
        }
        if d.orientation.is_some() {
            base.defaults.orientation = d.orientation;
        }
        if d.image_size.is_some() {
            base.defaults.image_size = d.image_size;
        }
    }

    fn apply_env_overrides<F>(config: &mut PostcardConfigFile, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("POSTCARD_API_KEY").or_else(|| non_empty("API_KEY")) {
            config.provider.api_key = Some(key);
        }
        if let Some(url) = non_empty("POSTCARD_API_URL") {
            config.provider.api_url = Some(url);
        }
        if let Some(name) = non_empty("POSTCARD_PROVIDER") {
            config.provider.name = Some(name);
        }
    }
}

impl From<PostcardConfigFile> for PostcardConfig {
    fn from(file: PostcardConfigFile) -> Self {
        Self {
            provider: file.provider,
            defaults: file.defaults,
        }
    }
}
