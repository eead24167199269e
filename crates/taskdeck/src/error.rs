//! Error types for taskdeck operations.

use crate::domain::ProjectId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for taskdeck operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The durable-storage collaborator failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] taskdeck_kv::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input failed record validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A status name did not match any known status.
    #[error("Invalid status '{0}'")]
    InvalidStatus(String),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// No ID greater than every registered ID is left to issue.
    #[error("Cannot issue a new ID: stored IDs already reach {0}")]
    IdsExhausted(i64),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.taskdeck/` directory in the working directory or its ancestors.
    #[error("Not a taskdeck workspace (or any of the parent directories). Run 'taskdeck init' first")]
    NotInitialized,

    /// `taskdeck init` was run where a workspace already exists.
    #[error("Taskdeck is already initialized here. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The configuration file could not be parsed or holds invalid values.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized Result type for taskdeck operations.
pub type Result<T> = std::result::Result<T, Error>;
