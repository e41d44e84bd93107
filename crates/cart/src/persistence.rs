//! Persistence capability for the cart store.
//!
//! [`CartStore`](crate::CartStore) never talks to storage directly. It is
//! handed a [`CartPersistence`] at construction, which keeps the store
//! testable (inject [`SlotPersistence`] over a [`MemoryStore`]) and lets the
//! integrator choose where the cart lives.
//!
//! Loading and saving are infallible from the store's point of view. A
//! missing or unreadable document loads as `None` and the cart starts empty;
//! a failed save is logged and dropped. Neither case is reported to callers.
//!
//! [`MemoryStore`]: crate::storage::MemoryStore

use tracing::{debug, error, warn};

use crate::storage::KeyValueStore;
use crate::{CartDocument, DocumentError, StorageError};

/// Default logical key of the durable cart slot.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// Where a cart document is loaded from and saved to.
pub trait CartPersistence {
    /// Load the persisted cart, or `None` if there is nothing usable.
    fn load(&self) -> Option<CartDocument>;

    /// Persist `document`, replacing whatever was stored before.
    fn save(&mut self, document: &CartDocument);
}

/// Stores the cart as JSON under a single key of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SlotPersistence<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> SlotPersistence<S> {
    /// Use `backend` with the default `"cart-storage"` key.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Use `backend` with a custom key.
    ///
    /// The key is checked by the backend on every access; an invalid key
    /// behaves like an unreadable slot.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Read and decode the slot, keeping the failure reason.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if the backend cannot be read or the stored
    /// document cannot be decoded or migrated.
    pub fn try_load(&self) -> Result<Option<CartDocument>, SlotError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(CartDocument::decode(&raw)?))
    }

    /// Encode and write `document`, keeping the failure reason.
    ///
    /// # Errors
    ///
    /// Returns `SlotError` if encoding or the backend write fails.
    pub fn try_save(&mut self, document: &CartDocument) -> Result<(), SlotError> {
        let raw = document.encode().map_err(DocumentError::from)?;
        self.backend.set(&self.key, &raw)?;
        Ok(())
    }
}

impl<S: KeyValueStore> CartPersistence for SlotPersistence<S> {
    fn load(&self) -> Option<CartDocument> {
        match self.try_load() {
            Ok(Some(document)) => Some(document),
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart found");
                None
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable persisted cart");
                None
            }
        }
    }

    fn save(&mut self, document: &CartDocument) {
        if let Err(e) = self.try_save(document) {
            error!(
                key = %self.key,
                revision = document.revision,
                error = %e,
                "Failed to persist cart"
            );
        }
    }
}

/// Why a slot could not be read or written.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    /// Backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding, decoding or migration failure.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}
