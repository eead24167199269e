//! Creation inputs and partial-update patches.

use super::records::avatar_url;
use super::{
    validate_description, validate_title, MemberId, MemberRef, Priority, Project, ProjectStatus,
    Task, TaskId, TaskStatus, TeamMember,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// Data for creating a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project name (required)
    pub name: String,

    /// Project description (required)
    pub description: String,

    /// Initial status
    pub status: ProjectStatus,

    /// Deadline (required)
    pub deadline: NaiveDate,

    /// Initial team roster
    pub team: Vec<NewTeamMember>,

    /// Initial tasks
    pub tasks: Vec<NewTask>,
}

impl NewProject {
    /// A project with the required fields and no team or tasks.
    pub fn new(name: impl Into<String>, description: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: ProjectStatus::default(),
            deadline,
            team: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Validate required fields, the roster and the initial tasks.
    ///
    /// Member IDs do not exist until the project is created, so initial
    /// tasks cannot carry assignees.
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

        for member in &self.team {
            member.validate()?;
        }
        for task in &self.tasks {
            task.validate()?;
            if !task.assignees.is_empty() {
                return Err(format!(
                    "Initial task '{}' cannot have assignees",
                    task.title.trim()
                ));
            }
        }
        Ok(())
    }
}

/// Data for adding a team member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeamMember {
    /// Display name (required)
    pub name: String,

    /// Contact email (required)
    pub email: String,

    /// Role on the team
    pub role: String,
}

impl NewTeamMember {
    /// Validate the member's name and email.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> Result<(), String> {
        validate_title("Member name", self.name.trim())?;
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Member email cannot be empty".to_string());
        }
        if !email.contains('@') {
            return Err(format!("Invalid email address '{email}'"));
        }
        Ok(())
    }

    /// Build the member record, deriving the avatar from the name.
    pub fn into_member(self, id: MemberId) -> TeamMember {
        let name = self.name.trim().to_string();
        TeamMember {
            id,
            avatar: avatar_url(&name),
            name,
            email: self.email.trim().to_string(),
            role: self.role.trim().to_string(),
        }
    }
}

/// Data for adding a task to a project
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title (required)
    pub title: String,

    /// Task description
    pub description: String,

    /// Initial board column
    pub status: TaskStatus,

    /// Priority level
    pub priority: Priority,

    /// Due date
    pub due_date: NaiveDate,

    /// Assigned members
    pub assignees: Vec<MemberId>,
}

impl NewTask {
    /// A medium-priority "To Do" task with no description or assignees.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: Priority::default(),
            due_date,
            assignees: Vec::new(),
        }
    }

    /// Validate the title and description.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self) -> Result<(), String> {
        validate_title("Task title", self.title.trim())?;
        validate_description("Task description", &self.description)
    }

    /// Build the task record, created at `now`.
    ///
    /// Duplicate assignees collapse to one reference.
    pub fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            created_at: now,
            completed: false,
            completed_at: None,
            assignees: dedup_refs(&self.assignees),
        }
    }
}

/// Partial update for a task
///
/// Only fields set to `Some` are merged. Setting `completed` keeps
/// `completedAt` consistent; setting `status` never touches completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New board column
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date
    pub due_date: Option<NaiveDate>,

    /// Mark completed or not completed
    pub completed: Option<bool>,

    /// Replacement assignee set
    pub assignees: Option<Vec<MemberId>>,
}

impl TaskPatch {
    /// A patch that only moves the task to `status`.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// A patch that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the patch against the task schema and the project's team.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn validate(&self, project: &Project) -> Result<(), String> {
        if let Some(title) = &self.title {
            validate_title("Task title", title.trim())?;
        }
        if let Some(description) = &self.description {
            validate_description("Task description", description)?;
        }
        if let Some(assignees) = &self.assignees {
            project.check_assignees(assignees)?;
        }
        Ok(())
    }

    /// Merge the patch into `task`. Completion is stamped with `now`.
    pub fn apply_to(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        match self.completed {
            Some(true) => task.complete(now),
            Some(false) => task.reopen(),
            None => {}
        }
        if let Some(assignees) = self.assignees {
            task.assignees = dedup_refs(&assignees);
        }
    }
}

/// Field edits for a project, applied before a full replacement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,

    /// New deadline
    pub deadline: Option<NaiveDate>,
}

impl ProjectUpdate {
    /// Return a copy of `project` with the edits applied.
    pub fn applied_to(&self, project: &Project) -> Project {
        let mut updated = project.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            updated.description.clone_from(description);
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        if let Some(deadline) = self.deadline {
            updated.deadline = deadline;
        }
        updated
    }
}

fn dedup_refs(ids: &[MemberId]) -> Vec<MemberRef> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .map(|id| MemberRef::from(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectId;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project_with_member() -> Project {
        Project {
            id: ProjectId(1),
            name: "Site".to_string(),
            description: "Marketing site".to_string(),
            status: ProjectStatus::Planning,
            deadline: date(2024, 6, 1),
            team: vec![NewTeamMember {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: "Dev".to_string(),
            }
            .into_member(MemberId(10))],
            tasks: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn new_project_requires_name_and_description() {
        let deadline = date(2024, 6, 1);
        assert!(NewProject::new("", "desc", deadline).validate().is_err());
        assert!(NewProject::new("Name", "  ", deadline).validate().is_err());
        assert!(NewProject::new("Name", "desc", deadline).validate().is_ok());
    }

    #[test]
    fn new_member_requires_email() {
        let member = NewTeamMember {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            role: String::new(),
        };
        assert!(member.validate().unwrap_err().contains("Invalid email"));
    }

    #[test]
    fn into_member_derives_avatar() {
        let member = NewTeamMember {
            name: " Grace Hopper ".to_string(),
            email: "grace@example.com".to_string(),
            role: "Lead".to_string(),
        }
        .into_member(MemberId(1));

        assert_eq!(member.name, "Grace Hopper");
        assert_eq!(
            member.avatar,
            "https://ui-avatars.com/api/?name=Grace%20Hopper"
        );
    }

    #[test]
    fn into_task_deduplicates_assignees() {
        let mut new_task = NewTask::new("Design", date(2024, 2, 1));
        new_task.assignees = vec![MemberId(1), MemberId(2), MemberId(1)];

        let task = new_task.into_task(TaskId(5), Utc::now());

        assert_eq!(task.assignees.len(), 2);
        assert!(!task.completed);
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn patch_completion_maintains_invariant() {
        let now = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let mut task = NewTask::new("Design", date(2024, 2, 1)).into_task(TaskId(1), now);

        TaskPatch::completed(true).apply_to(&mut task, now);
        assert_eq!(task.completed_at, Some(now));

        TaskPatch::completed(false).apply_to(&mut task, now);
        assert!(task.completed_at.is_none());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn status_patch_does_not_complete_task() {
        let now = Utc::now();
        let mut task = NewTask::new("Design", date(2024, 2, 1)).into_task(TaskId(1), now);

        TaskPatch::status(TaskStatus::Done).apply_to(&mut task, now);

        assert_eq!(task.status, TaskStatus::Done);
        assert!(!task.completed);
    }

    #[test]
    fn patch_validation_checks_team_membership() {
        let project = project_with_member();

        let ok = TaskPatch {
            assignees: Some(vec![MemberId(10)]),
            ..Default::default()
        };
        assert!(ok.validate(&project).is_ok());

        let unknown = TaskPatch {
            assignees: Some(vec![MemberId(99)]),
            ..Default::default()
        };
        assert!(unknown.validate(&project).unwrap_err().contains("99"));
    }

    #[test]
    fn patch_validation_rejects_blank_title() {
        let patch = TaskPatch {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(patch.validate(&project_with_member()).is_err());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::status(TaskStatus::InReview).is_empty());
    }

    #[test]
    fn project_update_only_touches_given_fields() {
        let project = project_with_member();
        let update = ProjectUpdate {
            status: Some(ProjectStatus::OnHold),
            ..Default::default()
        };

        let updated = update.applied_to(&project);

        assert_eq!(updated.status, ProjectStatus::OnHold);
        assert_eq!(updated.name, project.name);
        assert_eq!(updated.team, project.team);
    }
}
