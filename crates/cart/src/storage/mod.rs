//! Key-value storage backends for the durable cart slot.
//!
//! Backends store raw strings under a key. Encoding the cart document is the
//! persistence layer's job, so a backend never needs to know about serde.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, shared between clones (tests, previews)
//! - [`FileStore`] - one file per key in a directory, atomically replaced

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Maximum key length accepted by [`validate_key`].
pub const MAX_KEY_LENGTH: usize = 128;

/// A durable store addressed by string keys.
///
/// Writes replace the whole value (last write wins); there is no merge.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Check that `key` is usable as a slot name on every backend.
///
/// Keys must be 1-128 characters of `[A-Za-z0-9._-]` and must not start
/// with `.`, which keeps them from naming hidden or parent paths.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` describing the first violated rule.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = |reason| Err(StorageError::InvalidKey(key.to_owned(), reason));

    if key.is_empty() {
        return invalid("must not be empty");
    }
    if key.len() > MAX_KEY_LENGTH {
        return invalid("must be at most 128 characters");
    }
    if key.starts_with('.') {
        return invalid("must not start with '.'");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return invalid("may only contain ASCII letters, digits, '.', '_' and '-'");
    }
    Ok(())
}
