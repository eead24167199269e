//! Error types for taskdeck-kv operations.

use std::io;
use thiserror::Error;

/// The error type for taskdeck-kv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing a value.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The key is not usable as a storage key.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: String,
    },
}

/// A specialized Result type for taskdeck-kv operations.
pub type Result<T> = std::result::Result<T, Error>;
