//! Generate command: create a photo from a text prompt

use anyhow::{Context, Result};
use postcard_core::{Action, AspectRatio, ImageAsset, ImageSize, Orientation};
use postcard_gen::{ImageClient, PostcardConfig};
use std::path::PathBuf;

use super::{extension_for, load_config, user_error, write_image};

pub struct GenerateArgs {
    pub prompt: String,
    pub size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub orientation: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<String>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config();
    let size = resolve_size(args.size.as_deref(), &config)?;
    let aspect_ratio = resolve_aspect_ratio(args.aspect_ratio.as_deref(), args.orientation.as_deref(), &config)?;

    let client = ImageClient::from_config(&config, args.provider.as_deref())?;
    println!(
        "Generating {} {} image with {}...",
        size,
        aspect_ratio,
        client.provider_name()
    );

    let data = client
        .generate(&args.prompt, size, aspect_ratio, args.api_key.as_deref())
        .map_err(|e| user_error(e, Action::Generate))?;

    let asset = ImageAsset::generated(data, &args.prompt);
    let path = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("generated.{}", extension_for(&asset.current_data))));
    write_image(&asset.current_data, &path).context("Could not save generated image")?;

    println!("  {} -> {}", asset.name, path.display());
    Ok(())
}

pub(crate) fn resolve_size(flag: Option<&str>, config: &PostcardConfig) -> Result<ImageSize> {
    match flag {
        Some(s) => Ok(s.parse()?),
        None => Ok(config.defaults.image_size.unwrap_or_default()),
    }
}

/// Explicit ratio wins; otherwise follow the postcard orientation
pub(crate) fn resolve_aspect_ratio(
    ratio: Option<&str>,
    orientation: Option<&str>,
    config: &PostcardConfig,
) -> Result<AspectRatio> {
    if let Some(r) = ratio {
        return Ok(r.parse()?);
    }
    let orientation: Orientation = match orientation {
        Some(o) => o.parse()?,
        None => config.defaults.orientation.unwrap_or_default(),
    };
    Ok(orientation.generation_aspect_ratio())
}
