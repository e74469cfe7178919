//! Postcard Core - Foundational types for Postcard Studio
//!
//! This crate provides the types every other Postcard crate depends on:
//! - `AssetId` - Opaque, process-unique asset identifiers
//! - `ImageAsset` - One photo tracked by the studio
//! - `DataUri` - The only image representation exchanged between crates
//! - Config selections (`PostcardSize`, `Orientation`, `ImageSize`, ...)
//! - Error taxonomy and Result alias

mod data_uri;
mod error;
mod id;
mod types;

pub use data_uri::DataUri;
pub use error::{Action, PostcardError, Result, STALE_CREDENTIAL_MARKER};
pub use id::AssetId;
pub use types::{AspectRatio, ImageAsset, ImageSize, InputMode, Orientation, PostcardSize, SizeConfig};
