//! The key-value store trait.

use crate::Result;
use async_trait::async_trait;

/// A durable string store addressed by key.
///
/// This is the whole contract the taskdeck project store relies on: read a
/// value that may be absent, and overwrite a value. Implementations must be
/// `Send + Sync` so they can be boxed behind `dyn KeyValueStore`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key fails [`validate_key`](crate::validate_key)
    /// - `Error::Io` if the backend cannot be read
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidKey` if the key fails [`validate_key`](crate::validate_key)
    /// - `Error::Io` if the backend cannot be written
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
