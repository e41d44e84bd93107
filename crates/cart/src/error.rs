//! Error types for cart storage.
//!
//! Cart mutations themselves never fail. These errors only surface from the
//! storage layer and are absorbed by [`crate::persistence::SlotPersistence`],
//! which logs them and falls back to an empty cart.

use thiserror::Error;

/// Errors from a [`crate::storage::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used as a storage slot name.
    #[error("invalid storage key {0:?}: {1}")]
    InvalidKey(String, &'static str),
}

/// Errors decoding or migrating a persisted cart document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The slot does not contain valid JSON, or the body does not match its version.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was written by a newer schema than this build understands.
    #[error("unsupported cart document version {found} (newest known is {supported})")]
    UnsupportedVersion {
        /// Version tag found in the document.
        found: u64,
        /// Newest version this build can read.
        supported: u64,
    },

    /// The JSON is valid but is neither a versioned document nor a legacy item list.
    #[error("malformed cart document: {0}")]
    Malformed(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidKey("../etc".to_string(), "must not contain '/'");
        assert_eq!(
            err.to_string(),
            "invalid storage key \"../etc\": must not contain '/'"
        );
    }

    #[test]
    fn test_unsupported_version_display() {
        let err = DocumentError::UnsupportedVersion {
            found: 9,
            supported: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported cart document version 9 (newest known is 1)"
        );
    }
}
