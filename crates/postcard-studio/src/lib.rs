//! Postcard Studio - gallery state for postcard collages
//!
//! Owns the ordered asset store, the upload ingestion pipeline, the edit
//! preview session and the collage layout computed from the gallery.

pub mod editor;
pub mod ingest;
pub mod layout;
pub mod presets;
pub mod session;
pub mod store;

pub use editor::EditSession;
pub use ingest::{BatchReport, BlobDecoder, DataUriDecoder, FileBlob, Ingestor, PendingBatch};
pub use layout::{CollageLayout, GridShape, LayoutCell};
pub use session::PostcardSession;
pub use store::{AssetPatch, AssetStore};
