//! Opaque asset identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::PostcardError;

/// Global counter for generating unique IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one image asset.
///
/// Generated once at creation and never reused within a process, so it is the
/// only key asynchronous work needs to find its target asset again. Parsing an
/// id moves the counter past it, so later `new()` calls cannot collide.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    /// Allocate a fresh, unique AssetId
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Set the counter to at least `value + 1`
    fn ensure_counter_above(value: u64) {
        let mut current = NEXT_ID.load(Ordering::Relaxed);
        while current <= value {
            match NEXT_ID.compare_exchange_weak(
                current,
                value.saturating_add(1),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current = c,
            }
        }
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{:04x}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = PostcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("img-")
            .ok_or_else(|| PostcardError::InvalidInput(format!("not an asset id: {}", s)))?;
        let raw = u64::from_str_radix(hex, 16)
            .map_err(|_| PostcardError::InvalidInput(format!("not an asset id: {}", s)))?;
        Self::ensure_counter_above(raw);
        Ok(Self(raw))
    }
}
