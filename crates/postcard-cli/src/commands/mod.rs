//! CLI command implementations

pub mod catalog;
pub mod edit;
pub mod generate;
pub mod preview;
pub mod upload;

use anyhow::{Context, Result};
use postcard_core::{Action, DataUri, PostcardError};
use postcard_gen::PostcardConfig;
use postcard_studio::{BatchReport, FileBlob, PostcardSession};
use std::path::Path;

/// Load layered config, falling back to defaults when it can't be read
pub(crate) fn load_config() -> PostcardConfig {
    PostcardConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}", e);
        PostcardConfig::default()
    })
}

/// Queue `files` into the session and print each decode as it lands
pub(crate) fn ingest_files(session: &mut PostcardSession, files: &[String]) -> BatchReport {
    let blobs = files.iter().map(FileBlob::from_path).collect();
    let mut batch = session.upload(blobs);
    let total = batch.ids().len();
    log::info!("Decoding {} file(s)", total);

    while !batch.is_settled() {
        if batch.poll(session.store_mut()) == 0 {
            std::thread::sleep(std::time::Duration::from_millis(10));
        } else {
            log::info!("{}/{} settled", total - batch.remaining(), total);
        }
    }
    let report = batch.wait(session.store_mut());

    for failure in &report.failed {
        eprintln!("Skipped '{}': {}", failure.name, failure.error);
    }
    report
}

/// Map a client error to the text shown to users; the raw text goes to the debug log
pub(crate) fn user_error(err: PostcardError, action: Action) -> anyhow::Error {
    log::debug!("Raw {:?} error: {}", action, err);
    anyhow::anyhow!("{}", err.user_message(action))
}

/// Decode `data` and write it to `path`
pub(crate) fn write_image(data: &DataUri, path: &Path) -> Result<()> {
    let bytes = data.decode_bytes()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// File extension for an image MIME type
pub(crate) fn extension_for(data: &DataUri) -> &'static str {
    match data.mime_type() {
        Some("image/jpeg") => "jpg",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        Some("image/bmp") => "bmp",
        _ => "png",
    }
}
