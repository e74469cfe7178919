//! Edit command: apply an instruction or preset to one photo

use anyhow::{anyhow, bail, Context, Result};
use postcard_core::Action;
use postcard_gen::ImageClient;
use postcard_studio::{presets, EditSession, PostcardSession};
use std::path::{Path, PathBuf};

use super::{extension_for, ingest_files, load_config, user_error, write_image};

pub struct EditArgs {
    pub file: String,
    pub instruction: Option<String>,
    pub preset: Option<String>,
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<String>,
}

pub fn run(args: EditArgs) -> Result<()> {
    let instruction = resolve_instruction(args.instruction.as_deref(), args.preset.as_deref())?;

    let mut session = PostcardSession::new();
    let report = ingest_files(&mut session, std::slice::from_ref(&args.file));
    let id = *report
        .decoded
        .first()
        .ok_or_else(|| anyhow!("Could not load '{}'", args.file))?;
    session.set_editing(Some(id));
    let asset = session
        .editing_asset()
        .ok_or_else(|| anyhow!("Could not load '{}'", args.file))?;

    let config = load_config();
    let client = ImageClient::from_config(&config, args.provider.as_deref())?;
    println!("Editing {} with {}: {}", asset.name, client.provider_name(), instruction);

    let mut edit = EditSession::open(asset);
    edit.run(&client, &instruction, args.api_key.as_deref())
        .map_err(|e| user_error(e, Action::Edit))?;
    edit.apply(session.store_mut());

    let edited = session
        .store()
        .get(id)
        .map(|a| a.current_data.clone())
        .ok_or_else(|| anyhow!("Edited image is no longer in the gallery"))?;
    let path = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(Path::new(&args.file), extension_for(&edited)));
    write_image(&edited, &path).context("Could not save edited image")?;

    println!("  Saved {}", path.display());
    Ok(())
}

/// Free-form text, or the prompt behind a preset label
pub(crate) fn resolve_instruction(instruction: Option<&str>, preset: Option<&str>) -> Result<String> {
    match (instruction, preset) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(label)) => presets::find(label)
            .map(|p| p.prompt.to_string())
            .ok_or_else(|| anyhow!("Unknown preset '{}'. Run `postcard presets` to list them.", label)),
        (None, None) => bail!("Provide --instruction or --preset"),
    }
}

/// `photo.jpg` -> `photo-edited.<ext>` beside the source
fn default_output(source: &Path, ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    source.with_file_name(format!("{}-edited.{}", stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_resolves_to_prompt() {
        let preset = &presets::TABS[0].presets[0];
        let text = resolve_instruction(None, Some(&preset.label.to_uppercase())).unwrap();
        assert_eq!(text, preset.prompt);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        assert!(resolve_instruction(None, Some("no such preset")).is_err());
        assert!(resolve_instruction(None, None).is_err());
        assert_eq!(resolve_instruction(Some("add snow"), None).unwrap(), "add snow");
    }

    #[test]
    fn test_default_output_sits_beside_source() {
        assert_eq!(
            default_output(Path::new("trip/beach.jpg"), "png"),
            PathBuf::from("trip/beach-edited.png")
        );
    }
}
