//! Application context for CLI command execution.
//!
//! [`App`] locates the workspace, reads its configuration, opens the
//! configured backend and loads the [`ProjectStore`]. It also carries the
//! view [`Navigator`], so commands move through the same list, board and
//! form views as the interactive app.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} projects", app.store().projects().len());
//!     Ok(())
//! }
//! ```

use crate::commands::init::{find_taskdeck_root, TaskdeckConfig, CONFIG_FILE_NAME, TASKDECK_DIR_NAME};
use crate::error::{ConfigError, Result};
use crate::storage::{LoadWarning, ProjectStore};
use crate::view::{NavAction, Navigator, View};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    store: ProjectStore,
    navigator: Navigator,
    taskdeck_dir: PathBuf,
    config: TaskdeckConfig,
    warnings: Vec<LoadWarning>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("taskdeck_dir", &self.taskdeck_dir)
            .field("config", &self.config)
            .field("view", &self.navigator.current())
            .field("store", &self.store)
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for `.taskdeck/`, loads the
    /// configuration and opens the store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No workspace is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The backend cannot be read
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_taskdeck_root(working_dir).ok_or(ConfigError::NotInitialized)?;

        let taskdeck_dir = root_dir.join(TASKDECK_DIR_NAME);
        let config = TaskdeckConfig::load(&taskdeck_dir.join(CONFIG_FILE_NAME)).await?;

        let backend = config.storage.to_backend(&root_dir)?;
        let (store, warnings) = ProjectStore::load(backend, config.storage.key.clone()).await?;

        tracing::debug!(root = %root_dir.display(), projects = store.projects().len(), "Opened workspace");

        Ok(Self {
            store,
            navigator: Navigator::new(),
            taskdeck_dir,
            config,
            warnings,
        })
    }

    /// The project store.
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// The project store, for mutations.
    pub fn store_mut(&mut self) -> &mut ProjectStore {
        &mut self.store
    }

    /// Apply a navigation action and return the new view.
    pub fn navigate(&mut self, action: NavAction) -> View {
        self.navigator.apply(action)
    }

    /// The active view.
    pub fn view(&self) -> View {
        self.navigator.current()
    }

    /// Path to the `.taskdeck` directory.
    pub fn taskdeck_dir(&self) -> &Path {
        &self.taskdeck_dir
    }

    /// The loaded configuration.
    pub fn config(&self) -> &TaskdeckConfig {
        &self.config
    }

    /// Problems recovered from while loading stored projects.
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}
