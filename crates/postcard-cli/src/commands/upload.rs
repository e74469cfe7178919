//! Upload command: decode photos into the gallery

use anyhow::{bail, Result};
use postcard_core::ImageAsset;
use postcard_studio::PostcardSession;
use serde::Serialize;

use super::ingest_files;

/// One gallery entry, without the payload
#[derive(Debug, Serialize)]
pub(crate) struct GalleryRow {
    pub id: String,
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: usize,
    pub processing: bool,
    pub edited: bool,
}

impl From<&ImageAsset> for GalleryRow {
    fn from(asset: &ImageAsset) -> Self {
        Self {
            id: asset.id.to_string(),
            name: asset.name.clone(),
            mime_type: asset.current_data.mime_type().map(str::to_string),
            bytes: asset.current_data.len(),
            processing: asset.is_processing,
            edited: asset.is_edited(),
        }
    }
}

pub fn run(files: &[String], format: &str) -> Result<()> {
    let mut session = PostcardSession::new();
    let report = ingest_files(&mut session, files);

    let rows: Vec<GalleryRow> = session.images().iter().map(GalleryRow::from).collect();
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => {
            println!(
                "Gallery: {} image(s), {} failed",
                report.decoded.len(),
                report.failed.len()
            );
            for row in &rows {
                println!(
                    "  {}  {:<32} {:<11} {} bytes",
                    row.id,
                    row.name,
                    row.mime_type.as_deref().unwrap_or("-"),
                    row.bytes
                );
            }
        }
        other => bail!("Unknown format '{}'. Use 'text' or 'json'.", other),
    }

    if rows.is_empty() {
        bail!("No images could be loaded");
    }
    Ok(())
}
