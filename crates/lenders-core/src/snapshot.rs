//! Whole-ledger snapshot persisted as a single JSON file.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::fs::write_atomic;
use crate::model::{LedgerItem, WishlistItem};

/// Current on-disk format.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub format_version: String,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<LedgerItem>,
    #[serde(default)]
    pub wishlist: Vec<WishlistItem>,
}

impl LedgerSnapshot {
    pub fn new(items: Vec<LedgerItem>, wishlist: Vec<WishlistItem>, saved_at: DateTime<Utc>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION.to_string(),
            saved_at,
            items,
            wishlist,
        }
    }
}

/// Read a snapshot file.
///
/// # Errors
///
/// `NotFound` if the file does not exist, `Serialization` if it is not a
/// snapshot, `Storage` for an unsupported format version or other I/O
/// failures.
pub fn load_snapshot(path: &Path) -> Result<LedgerSnapshot> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            LedgerError::NotFound(format!("No ledger at {}", path.display()))
        }
        _ => LedgerError::Storage(format!("Read {} failed: {}", path.display(), e)),
    })?;
    let snapshot: LedgerSnapshot = serde_json::from_slice(&bytes)?;
    if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
        return Err(LedgerError::Storage(format!(
            "Unsupported ledger format version {} (expected {})",
            snapshot.format_version, SNAPSHOT_FORMAT_VERSION
        )));
    }
    tracing::debug!(
        path = %path.display(),
        items = snapshot.items.len(),
        wishlist = snapshot.wishlist.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot atomically, creating parent directories as needed.
pub fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    write_atomic(path, &bytes)?;
    tracing::debug!(path = %path.display(), items = snapshot.items.len(), "saved snapshot");
    Ok(())
}
