//! CLI command implementations.

pub mod cart;

use thiserror::Error;

use naked_pineapple_cart::{ConfigError, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Export serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
