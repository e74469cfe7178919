//! Photo edit session
//!
//! Edits are previewed before they touch the store: the session works on a
//! copy of the asset's current payload and only `apply` writes it back.

use postcard_core::{AssetId, DataUri, ImageAsset, Result};
use postcard_gen::ImageClient;

use crate::store::AssetStore;

#[derive(Debug, Clone)]
pub struct EditSession {
    asset_id: AssetId,
    original: DataUri,
    preview: DataUri,
}

impl EditSession {
    /// Start editing `asset` from what it currently shows
    pub fn open(asset: &ImageAsset) -> Self {
        Self {
            asset_id: asset.id,
            original: asset.original_data.clone(),
            preview: asset.current_data.clone(),
        }
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn preview(&self) -> &DataUri {
        &self.preview
    }

    /// Whether the preview differs from the unedited original
    pub fn is_modified(&self) -> bool {
        self.preview != self.original
    }

    /// Send the preview through the edit client.
    ///
    /// On failure the preview is left as it was and the error is returned.
    pub fn run(&mut self, client: &ImageClient, instruction: &str, credential: Option<&str>) -> Result<&DataUri> {
        let edited = client.edit(&self.preview, instruction, credential)?;
        self.preview = edited;
        Ok(&self.preview)
    }

    /// Discard every edit made so far, back to the original upload
    pub fn reset(&mut self) {
        self.preview = self.original.clone();
    }

    /// Write the preview to the store. False if the asset is gone.
    pub fn apply(self, store: &mut AssetStore) -> bool {
        let applied = store.save_edit(self.asset_id, self.preview);
        if !applied {
            log::debug!("Discarding edit for removed asset {}", self.asset_id);
        }
        applied
    }
}
