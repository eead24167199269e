//! Domain types for project and task tracking.
//!
//! This module contains the record model: identifiers, the status and
//! priority enumerations, the [`Project`], [`Task`] and [`TeamMember`]
//! records, and the inputs used to create and patch them.

mod inputs;
mod records;

pub use inputs::{NewProject, NewTask, NewTeamMember, ProjectUpdate, TaskPatch};
pub use records::{avatar_url, start_of_day, MemberRef, Project, Task, TeamMember, AVATAR_BASE_URL};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for titles and names
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for descriptions
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier for a task, unique within its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier for a team member, unique within its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub i64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Normalize a user-supplied enum name for lenient matching.
///
/// Lowercases, treats `-` and `_` as spaces, and collapses whitespace, so
/// `"In-Progress"`, `"in_progress"` and `"in  progress"` all compare equal.
fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    #[default]
    #[serde(rename = "To Do")]
    ToDo,

    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,

    /// Waiting for review
    #[serde(rename = "In Review")]
    InReview,

    /// Finished
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    /// Display name, as shown on the board and stored on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Done => "Done",
        }
    }

    /// Zero-based column position on the board.
    pub fn column_index(self) -> usize {
        match self {
            TaskStatus::ToDo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::InReview => 2,
            TaskStatus::Done => 3,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "to do" | "todo" => Ok(TaskStatus::ToDo),
            "in progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "in review" | "inreview" | "review" => Ok(TaskStatus::InReview),
            "done" => Ok(TaskStatus::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,

    /// Normal priority
    #[default]
    Medium,

    /// Needs attention first
    High,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Lowercase name, as stored on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::Validation(format!(
                "Invalid priority '{s}'. Valid priorities: low, medium, high"
            ))),
        }
    }
}

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Created, no work yet
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,

    /// Scoping the work
    Planning,

    /// Work underway
    #[serde(rename = "In Progress")]
    InProgress,

    /// Paused
    #[serde(rename = "On Hold")]
    OnHold,

    /// Being reviewed
    #[serde(rename = "Under Review")]
    UnderReview,

    /// Being tested
    Testing,

    /// Finished
    Completed,

    /// Abandoned
    Cancelled,
}

impl ProjectStatus {
    /// All project statuses in form order.
    pub const ALL: [ProjectStatus; 8] = [
        ProjectStatus::NotStarted,
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::OnHold,
        ProjectStatus::UnderReview,
        ProjectStatus::Testing,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    /// Display name, as stored on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::UnderReview => "Under Review",
            ProjectStatus::Testing => "Testing",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);
        ProjectStatus::ALL
            .into_iter()
            .find(|status| normalize_name(status.as_str()) == normalized)
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}

/// Validate a required single-line text field (names and titles).
///
/// Expects pre-trimmed input.
pub fn validate_title(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    if value.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "{field} cannot exceed {MAX_TITLE_LENGTH} characters"
        ));
    }

    if value.contains('\n') || value.contains('\r') {
        return Err(format!("{field} cannot contain newline characters"));
    }

    Ok(())
}

/// Validate a description length.
pub fn validate_description(field: &str, value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(format!(
            "{field} cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("To Do", TaskStatus::ToDo)]
    #[case("todo", TaskStatus::ToDo)]
    #[case("in-progress", TaskStatus::InProgress)]
    #[case("IN_PROGRESS", TaskStatus::InProgress)]
    #[case("In Review", TaskStatus::InReview)]
    #[case("done", TaskStatus::Done)]
    fn task_status_parses_lenient_names(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
    }

    #[test]
    fn task_status_rejects_unknown_name() {
        let err = "Blocked".parse::<TaskStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(s) if s == "Blocked"));
    }

    #[test]
    fn task_status_display_round_trips() {
        for status in TaskStatus::ALL {
            assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn task_status_column_order_matches_all() {
        for (index, status) in TaskStatus::ALL.into_iter().enumerate() {
            assert_eq!(status.column_index(), index);
        }
    }

    #[test]
    fn task_status_serializes_as_display_name() {
        let json = serde_json::to_string(&TaskStatus::InReview).unwrap();
        assert_eq!(json, r#""In Review""#);
    }

    #[test]
    fn project_status_parses_every_variant() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
        assert_eq!(
            "on-hold".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::OnHold
        );
    }

    #[test]
    fn project_status_serializes_as_display_name() {
        let json = serde_json::to_string(&ProjectStatus::UnderReview).unwrap();
        assert_eq!(json, r#""Under Review""#);
        let parsed: ProjectStatus = serde_json::from_str(r#""Not Started""#).unwrap();
        assert_eq!(parsed, ProjectStatus::NotStarted);
    }

    #[test]
    fn priority_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[rstest]
    #[case::empty("", false)]
    #[case::blank("   ", false)]
    #[case::newline("a\nb", false)]
    #[case::valid("Launch website", true)]
    fn title_validation(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_title("Title", value).is_ok(), ok);
    }

    #[test]
    fn title_validation_limits_length() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        let err = validate_title("Name", &long).unwrap_err();
        assert!(err.contains("cannot exceed"));
    }
}
