//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation. Projects are addressed by ID or by name;
//! tasks and team members by ID.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{PriorityArg, ProjectStatusArg, TaskStatusArg};
use super::validators::{
    parse_date, parse_member, validate_description, validate_email, validate_key, validate_title,
};
use crate::domain::NewTeamMember;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Key the project collection is stored under
    ///
    /// Alphanumerics, '-' and '_'. Defaults to "projects".
    #[arg(short, long, value_parser = validate_key)]
    pub key: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `project` command
#[derive(Parser, Debug, Clone)]
pub struct ProjectArgs {
    /// Project action
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectAction {
    /// Create a project
    Create(ProjectCreateArgs),

    /// List all projects with their progress
    List,

    /// Show a project with its team and tasks
    Show(ProjectTarget),

    /// Edit a project's fields
    Edit(ProjectEditArgs),

    /// Delete a project and all its tasks
    Delete(ProjectTarget),

    /// Add a member to the project's team
    AddMember(AddMemberArgs),

    /// Remove a member from the team and from every task
    RemoveMember(RemoveMemberArgs),
}

/// Arguments for `project create`
#[derive(Parser, Debug, Clone)]
pub struct ProjectCreateArgs {
    /// Project name
    #[arg(long, value_parser = validate_title)]
    pub name: String,

    /// Project description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: String,

    /// Deadline (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub deadline: NaiveDate,

    /// Initial status
    #[arg(short, long, value_enum, default_value = "not-started")]
    pub status: ProjectStatusArg,

    /// Team member as NAME:EMAIL[:ROLE] (repeatable)
    #[arg(short, long = "member", value_parser = parse_member)]
    pub members: Vec<NewTeamMember>,
}

/// Arguments for `project edit`
#[derive(Parser, Debug, Clone)]
pub struct ProjectEditArgs {
    /// Project ID or name
    pub project: String,

    /// New name
    #[arg(long, value_parser = validate_title)]
    pub name: Option<String>,

    /// New description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<ProjectStatusArg>,

    /// New deadline (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub deadline: Option<NaiveDate>,
}

/// Arguments for `project add-member`
#[derive(Parser, Debug, Clone)]
pub struct AddMemberArgs {
    /// Project ID or name
    pub project: String,

    /// Member name
    #[arg(long, value_parser = validate_title)]
    pub name: String,

    /// Member email
    #[arg(long, value_parser = validate_email)]
    pub email: String,

    /// Role on the team
    #[arg(short, long, default_value = "")]
    pub role: String,
}

/// Arguments for `project remove-member`
#[derive(Parser, Debug, Clone)]
pub struct RemoveMemberArgs {
    /// Project ID or name
    pub project: String,

    /// Member ID
    pub member: i64,
}

/// Arguments for the `task` command
#[derive(Parser, Debug, Clone)]
pub struct TaskArgs {
    /// Task action
    #[command(subcommand)]
    pub action: TaskAction,
}

/// Task subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskAction {
    /// Add a task to a project
    Add(TaskAddArgs),

    /// Update a task's fields
    Update(TaskUpdateArgs),

    /// Move a task to another board column
    Move(TaskMoveArgs),

    /// Mark a task completed
    Complete(TaskRef),

    /// Mark a task not completed
    Reopen(TaskRef),

    /// Delete a task
    Delete(TaskRef),
}

/// A task within a project
#[derive(Parser, Debug, Clone)]
pub struct TaskRef {
    /// Project ID or name
    pub project: String,

    /// Task ID
    pub task: i64,
}

/// Arguments for `task add`
#[derive(Parser, Debug, Clone)]
pub struct TaskAddArgs {
    /// Project ID or name
    pub project: String,

    /// Task title
    #[arg(long, value_parser = validate_title)]
    pub title: String,

    /// Task description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: NaiveDate,

    /// Priority
    #[arg(short, long, value_enum, default_value = "medium")]
    pub priority: PriorityArg,

    /// Initial board column
    #[arg(short, long, value_enum, default_value = "todo")]
    pub status: TaskStatusArg,

    /// Assigned member IDs (comma-separated)
    #[arg(short, long = "assignee", value_delimiter = ',')]
    pub assignees: Vec<i64>,
}

/// Arguments for `task update`
#[derive(Parser, Debug, Clone)]
pub struct TaskUpdateArgs {
    /// Project ID or name
    pub project: String,

    /// Task ID
    pub task: i64,

    /// New title
    #[arg(long, value_parser = validate_title)]
    pub title: Option<String>,

    /// New description
    #[arg(short = 'D', long, value_parser = validate_description)]
    pub description: Option<String>,

    /// New board column
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,

    /// New priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// New due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    /// Replace the assignees with these member IDs (comma-separated)
    #[arg(short, long = "assignee", value_delimiter = ',', conflicts_with = "clear_assignees")]
    pub assignees: Vec<i64>,

    /// Remove every assignee
    #[arg(long)]
    pub clear_assignees: bool,
}

/// Arguments for `task move`
#[derive(Parser, Debug, Clone)]
pub struct TaskMoveArgs {
    /// Project ID or name
    pub project: String,

    /// Task ID
    pub task: i64,

    /// Target column, e.g. "In Review", "in-progress" or "done"
    pub to: String,
}

/// Arguments for commands that target one project
#[derive(Parser, Debug, Clone)]
pub struct ProjectTarget {
    /// Project ID or name
    pub project: String,
}

/// Arguments for the `compare` command
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Project ID or name
    pub project: String,

    /// Write the JSON report to this file, or into this directory under a
    /// generated name
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
