//! Which screen is showing: the project list, a board, or the form.

use crate::domain::ProjectId;
use serde::Serialize;
use std::fmt;

/// What the project form is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "projectId", rename_all = "lowercase")]
pub enum FormTarget {
    /// Creating a project
    New,
    /// Editing an existing project
    Edit(ProjectId),
}

/// The active view. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "view", content = "target", rename_all = "lowercase")]
pub enum View {
    /// All projects
    #[default]
    List,
    /// One project's board
    Board(ProjectId),
    /// The project form
    Form(FormTarget),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::List => f.write_str("project list"),
            View::Board(id) => write!(f, "board of project {id}"),
            View::Form(FormTarget::New) => f.write_str("new project form"),
            View::Form(FormTarget::Edit(id)) => write!(f, "edit form of project {id}"),
        }
    }
}

/// User actions that change the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Open a project's board
    Select(ProjectId),
    /// Return to the list
    Back,
    /// Open the form for a new project
    Create,
    /// Open the form for an existing project
    Edit(ProjectId),
    /// Leave the form without saving
    Cancel,
    /// Leave the form after saving the given project
    Submit(ProjectId),
}

/// The view state machine
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    /// Start at the project list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active view.
    pub fn current(&self) -> View {
        self.current
    }

    /// Apply `action` and return the new view.
    ///
    /// Selecting a project while the form is open is ignored, as is
    /// cancelling or submitting when no form is open.
    pub fn apply(&mut self, action: NavAction) -> View {
        let next = match (self.current, action) {
            (View::Form(_), NavAction::Select(_)) => self.current,
            (_, NavAction::Select(id)) => View::Board(id),
            (_, NavAction::Back) => View::List,
            (_, NavAction::Create) => View::Form(FormTarget::New),
            (_, NavAction::Edit(id)) => View::Form(FormTarget::Edit(id)),
            (View::Form(FormTarget::New), NavAction::Cancel | NavAction::Submit(_)) => {
                View::List
            }
            (View::Form(FormTarget::Edit(id)), NavAction::Cancel | NavAction::Submit(_)) => {
                View::Board(id)
            }
            (_, NavAction::Cancel | NavAction::Submit(_)) => self.current,
        };

        if next != self.current {
            tracing::debug!(from = %self.current, to = %next, "View changed");
        }
        self.current = next;
        next
    }
}
