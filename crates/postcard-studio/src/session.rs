//! Postcard session state
//!
//! Holds the asset store together with the user's current selections. Every
//! gallery mutation the front end can trigger goes through here.

use postcard_core::{AspectRatio, AssetId, DataUri, ImageAsset, InputMode, Orientation, PostcardSize};

use crate::ingest::{FileBlob, Ingestor, PendingBatch};
use crate::layout::CollageLayout;
use crate::store::AssetStore;

#[derive(Clone, Default)]
pub struct PostcardSession {
    pub size: PostcardSize,
    pub orientation: Orientation,
    pub input_mode: InputMode,
    store: AssetStore,
    editing: Option<AssetId>,
    ingestor: Ingestor,
}

impl PostcardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose uploads are decoded by a custom ingestor
    pub fn with_ingestor(ingestor: Ingestor) -> Self {
        Self {
            ingestor,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AssetStore {
        &mut self.store
    }

    pub fn images(&self) -> &[ImageAsset] {
        self.store.as_slice()
    }

    /// Add placeholders for `blobs` and start decoding them
    pub fn upload(&mut self, blobs: Vec<FileBlob>) -> PendingBatch {
        self.ingestor.ingest(&mut self.store, blobs)
    }

    /// Append a freshly generated image at the end of the gallery
    pub fn add_generated(&mut self, data: DataUri, prompt: &str) -> AssetId {
        let asset = ImageAsset::generated(data, prompt);
        let id = asset.id;
        self.store.add(vec![asset]);
        id
    }

    pub fn remove(&mut self, id: AssetId) {
        self.store.remove(id);
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    pub fn save_edit(&mut self, id: AssetId, data: DataUri) -> bool {
        self.store.save_edit(id, data)
    }

    pub fn reset_edit(&mut self, id: AssetId) -> bool {
        self.store.reset_edit(id)
    }

    /// Clear the gallery
    pub fn reset_all(&mut self) {
        self.store.reset();
        self.editing = None;
    }

    /// Select the asset shown in the editor. Unknown ids clear the selection.
    pub fn set_editing(&mut self, id: Option<AssetId>) {
        self.editing = id.filter(|id| self.store.contains(*id));
    }

    /// The asset being edited, if it still exists
    pub fn editing_asset(&self) -> Option<&ImageAsset> {
        self.editing.and_then(|id| self.store.get(id))
    }

    /// Aspect ratio requested from the generator for the current orientation
    pub fn generation_aspect_ratio(&self) -> AspectRatio {
        self.orientation.generation_aspect_ratio()
    }

    pub fn layout(&self) -> CollageLayout {
        CollageLayout::compute(self.size, self.orientation, self.store.as_slice())
    }
}
