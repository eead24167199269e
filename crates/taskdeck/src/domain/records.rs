//! Project, task and team member records.

use super::{
    validate_description, validate_title, MemberId, Priority, ProjectId, ProjectStatus,
    TaskId, TaskStatus,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;

/// Avatar service URL prefix; the encoded member name is appended.
pub const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/?name=";

/// Milliseconds in a day, for completion-time arithmetic.
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A person on a project's team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier within the project
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Role on the team (free text)
    #[serde(default)]
    pub role: String,

    /// Avatar image URL derived from the name
    #[serde(default)]
    pub avatar: String,
}

/// Reference from a task to an assigned team member
///
/// Serialized as `{ "id": <member id> }`. Extra fields (older data embeds
/// the whole member) are ignored on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    /// The referenced member
    pub id: MemberId,
}

impl From<MemberId> for MemberRef {
    fn from(id: MemberId) -> Self {
        Self { id }
    }
}

/// A unit of trackable work on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within the project
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Task description
    #[serde(default)]
    pub description: String,

    /// Board column
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Due date
    pub due_date: NaiveDate,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Whether the task has been marked complete
    #[serde(default)]
    pub completed: bool,

    /// Completion timestamp; present exactly when `completed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Assigned team members
    #[serde(default)]
    pub assignees: Vec<MemberRef>,
}

impl Task {
    /// Mark the task completed at `now`.
    ///
    /// Completing an already completed task keeps its original timestamp.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(now);
        }
    }

    /// Mark the task not completed, clearing the completion timestamp.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    /// Whether `member` is among the assignees.
    pub fn is_assigned_to(&self, member: MemberId) -> bool {
        self.assignees.iter().any(|a| a.id == member)
    }

    /// Whether the task is incomplete and its due date has passed.
    ///
    /// The due date counts from midnight UTC at its start, so a task due
    /// today is overdue for the rest of the day.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && start_of_day(self.due_date) < now
    }

    /// Days between creation and completion, if completed.
    pub fn completion_days(&self) -> Option<f64> {
        if !self.completed {
            return None;
        }
        self.completed_at.map(|done| {
            #[allow(clippy::cast_precision_loss)]
            let millis = (done - self.created_at).num_milliseconds() as f64;
            millis / MILLIS_PER_DAY
        })
    }

    /// Validate the task's fields and the completion invariant.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> Result<(), String> {
        validate_title("Task title", self.title.trim())?;
        validate_description("Task description", &self.description)?;

        match (self.completed, self.completed_at) {
            (true, None) => return Err("Completed task is missing completedAt".to_string()),
            (false, Some(_)) => {
                return Err("Incomplete task must not have completedAt".to_string())
            }
            _ => {}
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.assignees.iter().find(|a| !seen.insert(a.id)) {
            return Err(format!("Member {} is assigned twice", dup.id));
        }

        Ok(())
    }
}

/// A unit of work containing a team and a task collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Deadline
    pub deadline: NaiveDate,

    /// Team roster, in the order members were added
    #[serde(default)]
    pub team: Vec<TeamMember>,

    /// Tasks, in the order they were added
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Look up a task by ID.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a task by ID for modification.
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Look up a team member by ID.
    pub fn member(&self, id: MemberId) -> Option<&TeamMember> {
        self.team.iter().find(|m| m.id == id)
    }

    /// Number of tasks marked completed.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Tasks assigned to `member`.
    pub fn tasks_assigned_to(&self, member: MemberId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.is_assigned_to(member))
    }

    /// Check that every `id` resolves to a member of this project's team.
    ///
    /// # Errors
    ///
    /// Names the first member ID that is not on the team.
    pub fn check_assignees(&self, ids: &[MemberId]) -> Result<(), String> {
        match ids.iter().find(|id| self.member(**id).is_none()) {
            Some(missing) => Err(format!(
                "Member {missing} is not on the team of project {}",
                self.id
            )),
            None => Ok(()),
        }
    }

    /// Validate the project's fields, ID uniqueness and every task.
    ///
    /// Assignees that do not resolve to a team member are tolerated here;
    /// metrics skip them.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> Result<(), String> {
        validate_title("Project name", self.name.trim())?;
        if self.description.trim().is_empty() {
            return Err("Project description cannot be empty".to_string());
        }
        validate_description("Project description", &self.description)?;

        let mut member_ids = HashSet::new();
        for member in &self.team {
            if !member_ids.insert(member.id) {
                return Err(format!("Duplicate team member ID {}", member.id));
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(task.id) {
                return Err(format!("Duplicate task ID {}", task.id));
            }
            task.validate()
                .map_err(|e| format!("Task {}: {}", task.id, e))?;
        }

        Ok(())
    }
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Avatar URL for a display name.
///
/// # Examples
///
/// ```
/// use taskdeck::domain::avatar_url;
///
/// assert_eq!(
///     avatar_url("Ada Lovelace"),
///     "https://ui-avatars.com/api/?name=Ada%20Lovelace"
/// );
/// ```
pub fn avatar_url(name: &str) -> String {
    format!("{AVATAR_BASE_URL}{}", encode_uri_component(name))
}

/// Percent-encode everything except the URI-component unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => {
                // Writing to a String cannot fail
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}
