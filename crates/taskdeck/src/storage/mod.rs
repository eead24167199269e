//! The project store.
//!
//! [`ProjectStore`] owns the canonical project collection for a session.
//! Every mutation that changes state serializes the whole collection to
//! JSON and writes it to a [`KeyValueStore`] under a single key before
//! returning. Mutations that change nothing do not write.
//!
//! # Not-found handling
//!
//! Task edits (`update_task`, `move_task`, `delete_task`) treat a missing
//! project or task as a no-op: they log at `debug` and return `Ok(None)`
//! or `Ok(false)`. Operations that address a project directly
//! (`update_project`, `add_task`, member edits, `delete_project`) return
//! [`Error::ProjectNotFound`].
//!
//! # Persistence failures
//!
//! When the backend write fails the in-memory change has already been
//! made. The error is returned so the caller can report it; the next
//! successful persist (or an explicit [`ProjectStore::persist`]) writes the
//! current state. [`ProjectStore::reload`] discards unsaved changes.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use taskdeck::domain::{NewProject, NewTask};
//! use taskdeck::storage::ProjectStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> taskdeck::error::Result<()> {
//! let mut store = ProjectStore::in_memory();
//! let deadline = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
//!
//! let project = store
//!     .create_project(NewProject::new("Website", "Relaunch the site", deadline))
//!     .await?;
//! store
//!     .add_task(project.id, NewTask::new("Wireframes", deadline))
//!     .await?;
//!
//! assert_eq!(store.get(project.id).unwrap().tasks.len(), 1);
//! # Ok(())
//! # }
//! ```

mod load;

pub use load::{decode_projects, LoadWarning};

use crate::board;
use crate::domain::{
    MemberId, NewProject, NewTask, NewTeamMember, Project, ProjectId, Task, TaskId, TaskPatch,
    TaskStatus, TeamMember,
};
use crate::error::{Error, Result};
use crate::id_generation::IdGenerator;
use chrono::Utc;
use taskdeck_kv::{KeyValueStore, MemoryStore};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "projects";

/// Owner of the project collection
pub struct ProjectStore {
    projects: Vec<Project>,
    backend: Box<dyn KeyValueStore>,
    key: String,
    ids: IdGenerator,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.len())
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl ProjectStore {
    /// Open a store over `backend`, reading whatever is stored under `key`.
    ///
    /// An absent value yields an empty store. A value that cannot be
    /// decoded yields an empty (or partial) store plus warnings.
    ///
    /// # Errors
    ///
    /// Returns `Error::Persistence` if the backend cannot be read.
    pub async fn load(
        backend: Box<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Result<(Self, Vec<LoadWarning>)> {
        let mut store = Self {
            projects: Vec::new(),
            backend,
            key: key.into(),
            ids: IdGenerator::new(),
        };
        let warnings = store.reload().await?;
        Ok((store, warnings))
    }

    /// An empty store backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self {
            projects: Vec::new(),
            backend: Box::new(MemoryStore::new()),
            key: DEFAULT_KEY.to_string(),
            ids: IdGenerator::new(),
        }
    }

    /// All projects, in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a project by ID.
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Look up a project by ID or, failing that, by case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&Project> {
        let query = query.trim();
        query
            .parse::<i64>()
            .ok()
            .and_then(|id| self.get(ProjectId(id)))
            .or_else(|| {
                self.projects
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(query))
            })
    }

    /// The backend key the collection is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Create a project from `new`, with generated IDs for the project,
    /// its team members and its initial tasks.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` if `new` is invalid
    /// - `Error::IdsExhausted` if no new ID can be issued
    /// - `Error::Persistence` if the write fails
    pub async fn create_project(&mut self, new: NewProject) -> Result<Project> {
        new.validate().map_err(Error::Validation)?;

        let now = Utc::now();
        let id = ProjectId(self.ids.next_at(now)?);
        let team = new
            .team
            .into_iter()
            .map(|m| Ok(m.into_member(MemberId(self.ids.next_at(now)?))))
            .collect::<Result<Vec<_>>>()?;
        let tasks = new
            .tasks
            .into_iter()
            .map(|t| Ok(t.into_task(TaskId(self.ids.next_at(now)?), now)))
            .collect::<Result<Vec<_>>>()?;

        let project = Project {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            status: new.status,
            deadline: new.deadline,
            team,
            tasks,
            created_at: now,
        };

        tracing::info!(id = %project.id, name = %project.name, "Created project");
        self.projects.push(project.clone());
        self.persist().await?;
        Ok(project)
    }

    /// Replace the project with the same ID as `updated`.
    ///
    /// Member and task IDs it brings along are registered, so later IDs
    /// never collide with them.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project has that ID
    /// - `Error::Validation` if `updated` is invalid
    /// - `Error::Persistence` if the write fails
    pub async fn update_project(&mut self, updated: Project) -> Result<Project> {
        let index = self.index_of(updated.id)?;
        updated.validate().map_err(Error::Validation)?;
        self.register_ids(&updated);

        if self.projects[index] == updated {
            tracing::debug!(id = %updated.id, "Project unchanged, skipping persist");
            return Ok(updated);
        }

        self.projects[index] = updated.clone();
        tracing::info!(id = %updated.id, "Updated project");
        self.persist().await?;
        Ok(updated)
    }

    /// Remove a project and all its tasks.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project has that ID
    /// - `Error::Persistence` if the write fails
    pub async fn delete_project(&mut self, id: ProjectId) -> Result<Project> {
        let index = self.index_of(id)?;
        let removed = self.projects.remove(index);
        tracing::info!(id = %id, name = %removed.name, "Deleted project");
        self.persist().await?;
        Ok(removed)
    }

    /// Append a task to a project.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project has that ID
    /// - `Error::Validation` if the task is invalid or names an assignee
    ///   not on the team
    /// - `Error::IdsExhausted` if no new ID can be issued
    /// - `Error::Persistence` if the write fails
    pub async fn add_task(&mut self, project_id: ProjectId, new: NewTask) -> Result<Task> {
        let index = self.index_of(project_id)?;
        new.validate().map_err(Error::Validation)?;
        self.projects[index]
            .check_assignees(&new.assignees)
            .map_err(Error::Validation)?;

        let now = Utc::now();
        let task = new.into_task(TaskId(self.ids.next_at(now)?), now);
        self.projects[index].tasks.push(task.clone());

        tracing::info!(project = %project_id, task = %task.id, title = %task.title, "Added task");
        self.persist().await?;
        Ok(task)
    }

    /// Merge `patch` into a task.
    ///
    /// Returns the task after the merge, or `None` if the project or task
    /// does not exist.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` if the patch is invalid
    /// - `Error::Persistence` if the write fails
    pub async fn update_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Option<Task>> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            tracing::debug!(project = %project_id, "Project not found, ignoring task update");
            return Ok(None);
        };

        let Some(position) = project.tasks.iter().position(|t| t.id == task_id) else {
            tracing::debug!(project = %project_id, task = %task_id, "Task not found, ignoring update");
            return Ok(None);
        };

        patch.validate(project).map_err(Error::Validation)?;

        let task = &mut project.tasks[position];

        let before = task.clone();
        patch.apply_to(task, Utc::now());
        let after = task.clone();

        if after == before {
            tracing::debug!(task = %task_id, "Task unchanged, skipping persist");
            return Ok(Some(after));
        }

        tracing::debug!(project = %project_id, task = %task_id, "Updated task");
        self.persist().await?;
        Ok(Some(after))
    }

    /// Move a task to another board column.
    ///
    /// Completion is left as it is. Returns `None` if the project or task
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Persistence` if the write fails.
    pub async fn move_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
        target: TaskStatus,
    ) -> Result<Option<Task>> {
        self.update_task(project_id, task_id, board::move_patch(target))
            .await
    }

    /// Remove a task. Returns whether a task was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Persistence` if the write fails.
    pub async fn delete_task(&mut self, project_id: ProjectId, task_id: TaskId) -> Result<bool> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            tracing::debug!(project = %project_id, "Project not found, ignoring task delete");
            return Ok(false);
        };

        let before = project.tasks.len();
        project.tasks.retain(|t| t.id != task_id);
        if project.tasks.len() == before {
            tracing::debug!(project = %project_id, task = %task_id, "Task not found, ignoring delete");
            return Ok(false);
        }

        tracing::info!(project = %project_id, task = %task_id, "Deleted task");
        self.persist().await?;
        Ok(true)
    }

    /// Add a member to a project's team.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project has that ID
    /// - `Error::Validation` if the member is invalid
    /// - `Error::IdsExhausted` if no new ID can be issued
    /// - `Error::Persistence` if the write fails
    pub async fn add_member(
        &mut self,
        project_id: ProjectId,
        new: NewTeamMember,
    ) -> Result<TeamMember> {
        let index = self.index_of(project_id)?;
        new.validate().map_err(Error::Validation)?;

        let member = new.into_member(MemberId(self.ids.next()?));
        self.projects[index].team.push(member.clone());

        tracing::info!(project = %project_id, member = %member.id, name = %member.name, "Added team member");
        self.persist().await?;
        Ok(member)
    }

    /// Remove a member from a project's team and from every task's
    /// assignees. Returns whether the member was on the team.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project has that ID
    /// - `Error::Persistence` if the write fails
    pub async fn remove_member(&mut self, project_id: ProjectId, member_id: MemberId) -> Result<bool> {
        let index = self.index_of(project_id)?;
        let project = &mut self.projects[index];

        let before = project.team.len();
        project.team.retain(|m| m.id != member_id);
        if project.team.len() == before {
            tracing::debug!(project = %project_id, member = %member_id, "Member not on team");
            return Ok(false);
        }

        for task in &mut project.tasks {
            task.assignees.retain(|a| a.id != member_id);
        }

        tracing::info!(project = %project_id, member = %member_id, "Removed team member");
        self.persist().await?;
        Ok(true)
    }

    /// Write the whole collection to the backend.
    ///
    /// # Errors
    ///
    /// - `Error::Json` if serialization fails
    /// - `Error::Persistence` if the write fails
    pub async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.projects)?;
        tracing::debug!(key = %self.key, projects = self.projects.len(), bytes = json.len(), "Persisting projects");
        self.backend.set(&self.key, json).await?;
        Ok(())
    }

    /// Replace the in-memory collection with what the backend holds.
    ///
    /// Unsaved changes are discarded. Recovered decode problems are logged
    /// at `warn` and returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::Persistence` if the backend cannot be read.
    pub async fn reload(&mut self) -> Result<Vec<LoadWarning>> {
        let (projects, warnings) = match self.backend.get(&self.key).await? {
            Some(raw) => decode_projects(&raw),
            None => {
                tracing::debug!(key = %self.key, "No stored projects, starting empty");
                (Vec::new(), Vec::new())
            }
        };

        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        for project in &projects {
            self.register_ids(project);
        }

        tracing::debug!(projects = projects.len(), "Loaded projects");
        self.projects = projects;
        Ok(warnings)
    }

    fn register_ids(&mut self, project: &Project) {
        self.ids.register(project.id.0);
        for member in &project.team {
            self.ids.register(member.id.0);
        }
        for task in &project.tasks {
            self.ids.register(task.id.0);
        }
    }

    fn index_of(&self, id: ProjectId) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::ProjectNotFound(id))
    }
}
