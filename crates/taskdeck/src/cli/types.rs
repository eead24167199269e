//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::{Priority, ProjectStatus, TaskStatus};

/// Board column for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusArg {
    /// Not started
    #[value(name = "todo", alias = "to-do")]
    ToDo,
    /// Being worked on
    #[value(name = "in-progress", alias = "in_progress")]
    InProgress,
    /// Waiting for review
    #[value(name = "in-review", alias = "in_review")]
    InReview,
    /// Finished
    Done,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(arg: TaskStatusArg) -> Self {
        match arg {
            TaskStatusArg::ToDo => TaskStatus::ToDo,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::InReview => TaskStatus::InReview,
            TaskStatusArg::Done => TaskStatus::Done,
        }
    }
}

/// Task priority for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    /// Urgent
    High,
    /// Normal
    Medium,
    /// Whenever
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

/// Project lifecycle status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatusArg {
    /// Created, no work yet
    NotStarted,
    /// Scoping the work
    Planning,
    /// Work underway
    InProgress,
    /// Paused
    OnHold,
    /// Being reviewed
    UnderReview,
    /// Being tested
    Testing,
    /// Finished
    Completed,
    /// Abandoned
    Cancelled,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(arg: ProjectStatusArg) -> Self {
        match arg {
            ProjectStatusArg::NotStarted => ProjectStatus::NotStarted,
            ProjectStatusArg::Planning => ProjectStatus::Planning,
            ProjectStatusArg::InProgress => ProjectStatus::InProgress,
            ProjectStatusArg::OnHold => ProjectStatus::OnHold,
            ProjectStatusArg::UnderReview => ProjectStatus::UnderReview,
            ProjectStatusArg::Testing => ProjectStatus::Testing,
            ProjectStatusArg::Completed => ProjectStatus::Completed,
            ProjectStatusArg::Cancelled => ProjectStatus::Cancelled,
        }
    }
}
