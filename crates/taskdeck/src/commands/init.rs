//! Implementation of the `init` command.
//!
//! This module handles initialization of a taskdeck workspace, creating
//! the `.taskdeck/` directory with its configuration file and data
//! directory, and the configuration model read back by
//! [`App`](crate::app::App).

use crate::error::{ConfigError, Result};
use crate::storage::DEFAULT_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskdeck_kv::{validate_key, FileStore, KeyValueStore, MemoryStore};
use tokio::fs;

/// Name of the taskdeck directory
pub const TASKDECK_DIR_NAME: &str = ".taskdeck";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the data directory within `.taskdeck`
pub const DATA_DIR_NAME: &str = "data";

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for taskdeck
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskdeckConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Which key-value backend holds the project collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Process memory; nothing survives the process
    Memory,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend type
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory, relative to the workspace root
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the project collection is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    format!("{TASKDECK_DIR_NAME}/{DATA_DIR_NAME}")
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl StorageConfig {
    /// Open the configured backend for a workspace rooted at `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the storage key is invalid.
    pub fn to_backend(&self, root_dir: &Path) -> Result<Box<dyn KeyValueStore>> {
        validate_key(&self.key).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(match self.backend {
            BackendKind::File => Box::new(FileStore::new(root_dir.join(&self.data_dir))),
            BackendKind::Memory => {
                tracing::info!("Using in-memory storage; changes will not be saved");
                Box::new(MemoryStore::new())
            }
        })
    }
}

impl TaskdeckConfig {
    /// Create a configuration storing projects under `key`.
    pub fn new(key: &str) -> Self {
        Self {
            storage: StorageConfig {
                key: key.to_string(),
                ..StorageConfig::default()
            },
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Invalid(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Invalid(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created taskdeck directory
    pub taskdeck_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created data directory
    pub data_dir: PathBuf,
    /// Key the project collection will be stored under
    pub key: String,
}

/// Initialize a new taskdeck workspace in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - The `.taskdeck/` directory already exists
/// - The storage key is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, key: Option<&str>) -> Result<InitResult> {
    let key = key.unwrap_or(DEFAULT_KEY).trim();
    validate_key(key).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    let taskdeck_dir = base_dir.join(TASKDECK_DIR_NAME);
    if taskdeck_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(taskdeck_dir).into());
    }

    let config = TaskdeckConfig::new(key);
    let data_dir = base_dir.join(&config.storage.data_dir);
    fs::create_dir_all(&data_dir).await?;

    let config_file = taskdeck_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    tracing::info!(dir = %taskdeck_dir.display(), key, "Initialized taskdeck workspace");

    Ok(InitResult {
        taskdeck_dir,
        config_file,
        data_dir,
        key: key.to_string(),
    })
}

/// Check if a directory has been initialized with taskdeck.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TASKDECK_DIR_NAME).exists()
}

/// Find the workspace root by searching up the directory tree.
///
/// Returns the directory containing `.taskdeck/`, or `None` if there is
/// none within [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_taskdeck_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TASKDECK_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
