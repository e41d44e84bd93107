//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory holding the cart slot file (default: .np-cart)
//! - `CART_STORAGE_KEY` - Logical key of the cart slot (default: cart-storage)
//! - `CART_CURRENCY` - Currency used to display totals (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;

use thiserror::Error;

use naked_pineapple_core::CurrencyCode;

use crate::persistence::{DEFAULT_STORAGE_KEY, SlotPersistence};
use crate::storage::{FileStore, validate_key};
use crate::{CartStore, StorageError};

const DEFAULT_STORAGE_DIR: &str = ".np-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the file-backed slot
    pub storage_dir: PathBuf,
    /// Key of the cart slot inside `storage_dir`
    pub storage_key: String,
    /// Currency used when displaying totals
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = var("CART_STORAGE_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage_key = var("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_key(&storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let currency = match var("CART_CURRENCY") {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
            sentry_dsn: var("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: var("SENTRY_ENVIRONMENT"),
        })
    }

    /// Open the file-backed cart store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage directory cannot be created.
    pub fn open_store(&self) -> Result<CartStore<SlotPersistence<FileStore>>, StorageError> {
        let backend = FileStore::open(&self.storage_dir)?;
        Ok(CartStore::open(SlotPersistence::with_key(
            backend,
            self.storage_key.clone(),
        )))
    }
}
