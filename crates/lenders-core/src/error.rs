//! Error types for ledger core operations.
//!
//! Every error here is local and recoverable. The CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A required field was empty or a value failed validation.
    /// The mutation is rejected and the store is left unchanged.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced an id absent from the collection.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Scanned or pasted transfer text could not be decoded.
    #[error("Invalid code: {0}")]
    MalformedTransferRecord(String),

    /// A remote store or calendar operation failed.
    #[error("Remote operation failed: {0}")]
    RemoteOperationFailure(String),

    /// Local snapshot storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Snapshot or record (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LedgerError {
    pub fn not_found_item(id: &uuid::Uuid) -> Self {
        LedgerError::NotFound(format!("ledger item {}", id))
    }

    pub fn not_found_wishlist(id: &uuid::Uuid) -> Self {
        LedgerError::NotFound(format!("wishlist item {}", id))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LedgerError::Validation("Name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Name is required");

        let err = LedgerError::MalformedTransferRecord("missing field `name`".to_string());
        assert!(err.to_string().starts_with("Invalid code"));
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(LedgerError::from(io), LedgerError::Storage(_)));
    }
}
