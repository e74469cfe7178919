//! Postcard Gen - image generation and editing through an upstream service
//!
//! Provides the generation and edit clients used by the studio, a pluggable
//! provider framework (Gemini over HTTP, plus an offline mock), shared
//! response parsing and layered configuration with credential resolution.

pub mod client;
pub mod config;
pub mod provider;
pub mod providers;
pub mod response;
pub mod transport;

pub use client::ImageClient;
pub use config::{Credential, PostcardConfig};
pub use provider::{EditRequest, GenerateRequest, ImageProvider, InlineImage};
pub use transport::{HttpTransport, Transport};
