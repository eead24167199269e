//! Decoding the persisted project collection.
//!
//! Persisted state is a single JSON array of projects. Decoding never
//! fails: a document that is not a JSON array yields no projects, and
//! individual projects that fail to parse or validate are skipped. Each
//! recovery is reported as a [`LoadWarning`].

use crate::domain::{Project, ProjectId};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Non-fatal problem found while loading persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The stored document is not a JSON array of projects.
    ///
    /// **Effect**: the store starts empty. The stored value is left as is
    /// until the next mutation overwrites it.
    MalformedState {
        /// Parser message
        error: String,
    },

    /// One array element could not be read as a project, or failed
    /// validation.
    ///
    /// **Effect**: the element is skipped.
    InvalidProject {
        /// Zero-based position in the stored array
        index: usize,
        /// Why it was rejected
        error: String,
    },

    /// A project reuses an ID already loaded.
    ///
    /// **Effect**: the later project is skipped.
    DuplicateProject {
        /// Zero-based position in the stored array
        index: usize,
        /// The repeated ID
        id: ProjectId,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MalformedState { error } => {
                write!(f, "stored projects are unreadable, starting empty: {error}")
            }
            LoadWarning::InvalidProject { index, error } => {
                write!(f, "skipped project at position {index}: {error}")
            }
            LoadWarning::DuplicateProject { index, id } => {
                write!(f, "skipped project at position {index}: duplicate ID {id}")
            }
        }
    }
}

/// Decode a persisted collection.
pub fn decode_projects(raw: &str) -> (Vec<Project>, Vec<LoadWarning>) {
    let mut warnings = Vec::new();

    let elements = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(elements)) => elements,
        Ok(other) => {
            warnings.push(LoadWarning::MalformedState {
                error: format!("expected an array, found {}", json_kind(&other)),
            });
            return (Vec::new(), warnings);
        }
        Err(e) => {
            warnings.push(LoadWarning::MalformedState {
                error: e.to_string(),
            });
            return (Vec::new(), warnings);
        }
    };

    let mut projects = Vec::with_capacity(elements.len());
    let mut seen = HashSet::new();

    for (index, element) in elements.into_iter().enumerate() {
        let project: Project = match serde_json::from_value(element) {
            Ok(project) => project,
            Err(e) => {
                warnings.push(LoadWarning::InvalidProject {
                    index,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if let Err(error) = project.validate() {
            warnings.push(LoadWarning::InvalidProject { index, error });
            continue;
        }

        if !seen.insert(project.id) {
            warnings.push(LoadWarning::DuplicateProject {
                index,
                id: project.id,
            });
            continue;
        }

        projects.push(project);
    }

    (projects, warnings)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
