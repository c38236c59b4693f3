//! Filesystem helpers for crash-safe writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{LedgerError, Result};

/// Write `data` to `path` through a sibling temp file and a rename, so a
/// reader never observes a half-written file.
///
/// # Errors
///
/// Returns `LedgerError::Storage` if the temp file cannot be created,
/// written, synced or renamed into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| LedgerError::Storage(format!("Invalid path: {}", path.display())))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .map_err(|e| LedgerError::Storage(format!("Create {} failed: {}", parent.display(), e)))?;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LedgerError::Storage(format!("Invalid filename: {}", path.display())))?;
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Temp file create failed: {}", e)))?;
    let written = file.write_all(data).and_then(|_| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(LedgerError::Storage(format!("Temp file write failed: {}", e)));
    }
    drop(file);

    rename_with_fallback(&temp_path, path)
        .map_err(|e| LedgerError::Storage(format!("Atomic rename failed: {}", e)))
}

/// Rename, removing the destination and retrying on platforms where rename
/// refuses to replace an existing file. The temp file is removed if the
/// retry also fails.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!("initial: {}, retry: {}", initial_err, retry_err),
            )
        })?;
    }
    Ok(())
}
