//! Ordered in-memory asset collection
//!
//! The store is the single source of truth for every view. Insertion order is
//! display order; asynchronous work finds its target again by `AssetId` only.

use postcard_core::{AssetId, DataUri, ImageAsset};
use serde::Serialize;

/// A partial update applied to one asset. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPatch {
    pub name: Option<String>,
    /// Only honored while the asset's original payload is still empty
    pub original_data: Option<DataUri>,
    pub current_data: Option<DataUri>,
    pub is_processing: Option<bool>,
}

impl AssetPatch {
    /// The patch applied when an upload finishes decoding
    pub fn decoded(data: DataUri) -> Self {
        Self {
            name: None,
            original_data: Some(data.clone()),
            current_data: Some(data),
            is_processing: Some(false),
        }
    }

    /// The patch applied when an edit is saved
    pub fn edited(data: DataUri) -> Self {
        Self {
            current_data: Some(data),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetStore {
    assets: Vec<ImageAsset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch at the end, preserving its relative order.
    ///
    /// Assets whose id is already present are skipped so ids stay unique.
    pub fn add<I>(&mut self, assets: I)
    where
        I: IntoIterator<Item = ImageAsset>,
    {
        for asset in assets {
            if self.contains(asset.id) {
                log::warn!("Skipping asset with duplicate id {}", asset.id);
                continue;
            }
            self.assets.push(asset);
        }
    }

    /// Apply `patch` to the asset with `id`.
    ///
    /// Returns false, without touching anything, if the asset no longer exists.
    pub fn update_by_id(&mut self, id: AssetId, patch: AssetPatch) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id == id) else {
            return false;
        };

        if let Some(name) = patch.name {
            asset.name = name;
        }
        if let Some(original) = patch.original_data {
            if asset.original_data.is_empty() {
                asset.original_data = original;
            }
        }
        if let Some(current) = patch.current_data {
            asset.current_data = current;
        }
        if let Some(processing) = patch.is_processing {
            asset.is_processing = processing;
        }
        true
    }

    /// Remove the asset with `id`. Returns the removed asset, if any.
    pub fn remove(&mut self, id: AssetId) -> Option<ImageAsset> {
        let index = self.assets.iter().position(|a| a.id == id)?;
        Some(self.assets.remove(index))
    }

    /// Drop every asset
    pub fn reset(&mut self) {
        self.assets.clear();
    }

    /// Replace the displayed payload of `id`, leaving the original intact
    pub fn save_edit(&mut self, id: AssetId, data: DataUri) -> bool {
        self.update_by_id(id, AssetPatch::edited(data))
    }

    /// Restore the displayed payload of `id` to its original
    pub fn reset_edit(&mut self, id: AssetId) -> bool {
        let Some(original) = self.get(id).map(|a| a.original_data.clone()) else {
            return false;
        };
        self.update_by_id(id, AssetPatch::edited(original))
    }

    pub fn get(&self, id: AssetId) -> Option<&ImageAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.assets.iter()
    }

    pub fn as_slice(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn ids(&self) -> Vec<AssetId> {
        self.assets.iter().map(|a| a.id).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
