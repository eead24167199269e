//! File-backed key-value store with atomic writes.
//!
//! Each key maps to one file, `<dir>/<key>.json`. Writes go through the
//! temp-file-then-rename pattern:
//!
//! 1. The value is written to `<key>.json.tmp` alongside the target
//! 2. The temporary file is flushed and closed
//! 3. The temporary file is renamed over the target
//!
//! On POSIX systems a rename within one filesystem is atomic, so a crash
//! at any point leaves either the old value or the new value on disk, never
//! a partial write. A leftover `.tmp` file is harmless and is replaced by
//! the next successful write.

use crate::key::validate_key;
use crate::store::KeyValueStore;
use crate::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// File extension used for stored values.
pub const VALUE_EXTENSION: &str = "json";

/// Key-value store keeping one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the value files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if the key fails validation.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;
        write_atomic(&path, value.as_bytes()).await?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Atomically replace the contents of `path` with `bytes`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, bytes).await {
        // Best-effort cleanup of temp file
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Creates the temporary path used while writing `path`.
///
/// Appends `.tmp` to the existing extension, or uses `tmp` as the extension
/// if there is none.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
