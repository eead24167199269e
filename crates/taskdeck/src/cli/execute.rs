//! Command execution logic.
//!
//! Each command resolves its target project, moves the navigator the way
//! the interactive app would, calls the store and renders the result.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use super::args::{
    AddMemberArgs, CompareArgs, ExportArgs, InitArgs, ProjectAction, ProjectArgs,
    ProjectCreateArgs, ProjectEditArgs, ProjectTarget, RemoveMemberArgs, TaskAction, TaskAddArgs,
    TaskArgs, TaskMoveArgs, TaskRef, TaskUpdateArgs,
};
use crate::app::App;
use crate::board;
use crate::domain::{
    MemberId, NewProject, NewTask, NewTeamMember, Project, ProjectId, ProjectUpdate, Task, TaskId,
    TaskPatch,
};
use crate::export::ExportReport;
use crate::metrics::{self, ProjectMetrics};
use crate::output::{self, OutputMode};
use crate::view::NavAction;

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.key.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "taskdeck_dir": result.taskdeck_dir.display().to_string(),
            "config_file": result.config_file.display().to_string(),
            "data_dir": result.data_dir.display().to_string(),
            "key": result.key,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("Initialized taskdeck in {}", result.taskdeck_dir.display());
            println!("  Config: {}", result.config_file.display());
            println!("  Data:   {}", result.data_dir.display());
            println!("  Key:    {}", result.key);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute a `project` subcommand
pub async fn execute_project(
    app: &mut App,
    args: &ProjectArgs,
    output_mode: OutputMode,
) -> Result<()> {
    match &args.action {
        ProjectAction::Create(args) => project_create(app, args, output_mode).await,
        ProjectAction::List => {
            app.navigate(NavAction::Back);
            output::print_projects(app.store().projects(), output_mode)?;
            Ok(())
        }
        ProjectAction::Show(args) => {
            let id = open_board(app, &args.project)?;
            output::print_project_details(project(app, id)?, Utc::now(), output_mode)?;
            Ok(())
        }
        ProjectAction::Edit(args) => project_edit(app, args, output_mode).await,
        ProjectAction::Delete(args) => project_delete(app, args, output_mode).await,
        ProjectAction::AddMember(args) => add_member(app, args, output_mode).await,
        ProjectAction::RemoveMember(args) => remove_member(app, args, output_mode).await,
    }
}

async fn project_create(
    app: &mut App,
    args: &ProjectCreateArgs,
    output_mode: OutputMode,
) -> Result<()> {
    app.navigate(NavAction::Create);

    let mut new = NewProject::new(&args.name, &args.description, args.deadline);
    new.status = args.status.into();
    new.team.clone_from(&args.members);

    let created = app.store_mut().create_project(new).await?;
    app.navigate(NavAction::Submit(created.id));

    match output_mode {
        OutputMode::Json => output::print_json(&created)?,
        OutputMode::Text => output::print_message(&format!(
            "Created project {}: {}",
            created.id, created.name
        ))?,
    }
    Ok(())
}

async fn project_edit(app: &mut App, args: &ProjectEditArgs, output_mode: OutputMode) -> Result<()> {
    let id = resolve(app, &args.project)?;
    app.navigate(NavAction::Edit(id));

    let update = ProjectUpdate {
        name: args.name.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
        deadline: args.deadline,
    };
    if update == ProjectUpdate::default() {
        app.navigate(NavAction::Cancel);
        anyhow::bail!("No changes given. Use --name, --description, --status or --deadline");
    }

    let updated = update.applied_to(project(app, id)?);
    let saved = app.store_mut().update_project(updated).await?;
    app.navigate(NavAction::Submit(id));

    match output_mode {
        OutputMode::Json => output::print_json(&saved)?,
        OutputMode::Text => output::print_message(&format!("Updated project {}", saved.id))?,
    }
    Ok(())
}

async fn project_delete(
    app: &mut App,
    args: &ProjectTarget,
    output_mode: OutputMode,
) -> Result<()> {
    let id = resolve(app, &args.project)?;
    let removed = app.store_mut().delete_project(id).await?;
    app.navigate(NavAction::Back);

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "deleted": removed.id,
            "name": removed.name,
        }))?,
        OutputMode::Text => output::print_message(&format!(
            "Deleted project {}: {}",
            removed.id, removed.name
        ))?,
    }
    Ok(())
}

async fn add_member(app: &mut App, args: &AddMemberArgs, output_mode: OutputMode) -> Result<()> {
    let id = open_board(app, &args.project)?;
    let new = NewTeamMember {
        name: args.name.clone(),
        email: args.email.clone(),
        role: args.role.clone(),
    };

    let member = app.store_mut().add_member(id, new).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&member)?,
        OutputMode::Text => {
            output::print_message(&format!("Added member {} to project {id}", member.id))?;
            output::print_member(&member, output_mode)?;
        }
    }
    Ok(())
}

async fn remove_member(
    app: &mut App,
    args: &RemoveMemberArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let id = open_board(app, &args.project)?;
    let member = MemberId(args.member);

    if !app.store_mut().remove_member(id, member).await? {
        anyhow::bail!("Member {member} is not on project {id}");
    }

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "project": id,
            "removed": member,
        }))?,
        OutputMode::Text => {
            output::print_message(&format!("Removed member {member} from project {id}"))?;
        }
    }
    Ok(())
}

/// Execute a `task` subcommand
pub async fn execute_task(app: &mut App, args: &TaskArgs, output_mode: OutputMode) -> Result<()> {
    match &args.action {
        TaskAction::Add(args) => task_add(app, args, output_mode).await,
        TaskAction::Update(args) => task_update(app, args, output_mode).await,
        TaskAction::Move(args) => task_move(app, args, output_mode).await,
        TaskAction::Complete(args) => {
            patch_task(app, args, TaskPatch::completed(true), "Completed", output_mode).await
        }
        TaskAction::Reopen(args) => {
            patch_task(app, args, TaskPatch::completed(false), "Reopened", output_mode).await
        }
        TaskAction::Delete(args) => task_delete(app, args, output_mode).await,
    }
}

async fn task_add(app: &mut App, args: &TaskAddArgs, output_mode: OutputMode) -> Result<()> {
    let id = open_board(app, &args.project)?;

    let mut new = NewTask::new(&args.title, args.due);
    new.description = args.description.clone().unwrap_or_default();
    new.priority = args.priority.into();
    new.status = args.status.into();
    new.assignees = args.assignees.iter().copied().map(MemberId).collect();

    let task = app.store_mut().add_task(id, new).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => {
            output::print_message(&format!("Added task {}: {}", task.id, task.title))?;
        }
    }
    Ok(())
}

async fn task_update(app: &mut App, args: &TaskUpdateArgs, output_mode: OutputMode) -> Result<()> {
    let assignees = if args.clear_assignees {
        Some(Vec::new())
    } else if args.assignees.is_empty() {
        None
    } else {
        Some(args.assignees.iter().copied().map(MemberId).collect())
    };

    let patch = TaskPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
        due_date: args.due,
        completed: None,
        assignees,
    };
    if patch.is_empty() {
        anyhow::bail!("No changes given. See 'taskdeck task update --help'");
    }

    let target = TaskRef {
        project: args.project.clone(),
        task: args.task,
    };
    patch_task(app, &target, patch, "Updated", output_mode).await
}

async fn task_move(app: &mut App, args: &TaskMoveArgs, output_mode: OutputMode) -> Result<()> {
    let status = board::parse_target(&args.to)?;
    let id = open_board(app, &args.project)?;

    let task = app
        .store_mut()
        .move_task(id, TaskId(args.task), status)
        .await?;
    let task = found(task, id, args.task)?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => {
            output::print_message(&format!("Moved task {} to {}", task.id, task.status))?;
        }
    }
    Ok(())
}

async fn patch_task(
    app: &mut App,
    args: &TaskRef,
    patch: TaskPatch,
    verb: &str,
    output_mode: OutputMode,
) -> Result<()> {
    let id = open_board(app, &args.project)?;

    let task = app
        .store_mut()
        .update_task(id, TaskId(args.task), patch)
        .await?;
    let task = found(task, id, args.task)?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => {
            output::print_message(&format!("{verb} task {}", task.id))?;
            output::print_task(&task, project(app, id)?, output_mode)?;
        }
    }
    Ok(())
}

async fn task_delete(app: &mut App, args: &TaskRef, output_mode: OutputMode) -> Result<()> {
    let id = open_board(app, &args.project)?;
    let task = TaskId(args.task);

    if !app.store_mut().delete_task(id, task).await? {
        anyhow::bail!("Task {task} not found in project {id}");
    }

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "project": id,
            "deleted": task,
        }))?,
        OutputMode::Text => output::print_message(&format!("Deleted task {task}"))?,
    }
    Ok(())
}

/// Execute the board command
pub fn execute_board(
    app: &mut App,
    args: &ProjectTarget,
    output_mode: OutputMode,
) -> Result<()> {
    let id = open_board(app, &args.project)?;
    output::print_board(project(app, id)?, output_mode)?;
    Ok(())
}

/// Execute the metrics command
pub fn execute_metrics(
    app: &mut App,
    args: &ProjectTarget,
    output_mode: OutputMode,
) -> Result<()> {
    let id = open_board(app, &args.project)?;
    let project = project(app, id)?;
    let metrics = ProjectMetrics::compute(project, Utc::now());
    output::print_metrics(project, &metrics, output_mode)?;
    Ok(())
}

/// Execute the compare command
pub fn execute_compare(
    app: &mut App,
    _args: &CompareArgs,
    output_mode: OutputMode,
) -> Result<()> {
    app.navigate(NavAction::Back);
    let comparison = metrics::project_comparison(app.store().projects());
    output::print_comparison(&comparison, output_mode)?;
    Ok(())
}

/// Execute the export command
pub async fn execute_export(
    app: &mut App,
    args: &ExportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let id = open_board(app, &args.project)?;
    let report = ExportReport::build(project(app, id)?, Utc::now());

    let Some(output_path) = &args.output else {
        output::print_report(&report, output_mode)?;
        return Ok(());
    };

    let path: PathBuf = if output_path.is_dir() {
        output_path.join(report.file_name())
    } else {
        output_path.clone()
    };
    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    tracing::info!(project = %id, path = %path.display(), "Exported report");

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "project": id,
            "path": path.display().to_string(),
        }))?,
        OutputMode::Text => {
            output::print_message(&format!("Exported report to {}", path.display()))?;
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve a project given by ID or name.
fn resolve(app: &App, query: &str) -> Result<ProjectId> {
    app.store()
        .find(query)
        .map(|p| p.id)
        .ok_or_else(|| anyhow::anyhow!("Project not found: {query}"))
}

/// Resolve a project and open its board.
fn open_board(app: &mut App, query: &str) -> Result<ProjectId> {
    let id = resolve(app, query)?;
    app.navigate(NavAction::Select(id));
    Ok(id)
}

fn project(app: &App, id: ProjectId) -> Result<&Project> {
    app.store()
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Project not found: {id}"))
}

fn found(task: Option<Task>, project: ProjectId, task_id: i64) -> Result<Task> {
    task.ok_or_else(|| anyhow::anyhow!("Task {task_id} not found in project {project}"))
}
