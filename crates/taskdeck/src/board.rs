//! Kanban board: tasks grouped into status columns.
//!
//! The board is a view over a [`Project`]; it owns nothing. Moving a task
//! is a status-only patch applied through the store, so any column can
//! move to any other (including itself) and completion is never touched.

use crate::domain::{Project, Task, TaskPatch, TaskStatus};
use crate::error::Result;
use serde::Serialize;

/// One status column
#[derive(Debug, Clone, Serialize)]
pub struct Column<'a> {
    /// Column status
    pub status: TaskStatus,
    /// Number of tasks in the column
    pub count: usize,
    /// Tasks in project order
    pub tasks: Vec<&'a Task>,
}

/// The four columns of a project's board, in column order
#[derive(Debug, Clone, Serialize)]
pub struct Board<'a> {
    /// Columns: To Do, In Progress, In Review, Done
    pub columns: Vec<Column<'a>>,
}

impl<'a> Board<'a> {
    /// Group `project`'s tasks by status.
    pub fn of(project: &'a Project) -> Self {
        let columns = TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let tasks: Vec<&Task> =
                    project.tasks.iter().filter(|t| t.status == status).collect();
                Column {
                    status,
                    count: tasks.len(),
                    tasks,
                }
            })
            .collect();
        Self { columns }
    }

    /// The column for `status`.
    pub fn column(&self, status: TaskStatus) -> &Column<'a> {
        &self.columns[status.column_index()]
    }

    /// Total number of tasks on the board.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }
}

/// Parse a drop target into a status.
///
/// # Errors
///
/// Returns `Error::InvalidStatus` for names that are not a board column.
pub fn parse_target(target: &str) -> Result<TaskStatus> {
    target.parse()
}

/// The patch that moves a task into `target`.
pub fn move_patch(target: TaskStatus) -> TaskPatch {
    TaskPatch::status(target)
}
