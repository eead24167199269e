//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for taskdeck using
//! clap's derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a taskdeck workspace
//! - `project`: Create, list, show, edit and delete projects; manage teams
//! - `task`: Add, update, move, complete, reopen and delete tasks
//! - `board`: Show a project's kanban board
//! - `metrics`: Show a project's metrics and health
//! - `compare`: Compare completion across projects
//! - `export`: Export a project report
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! taskdeck project create --name "Website" -D "Relaunch" --deadline 2025-06-30
//! taskdeck task add Website --title "Wireframes" --due 2025-03-01 -p high
//! taskdeck task move Website 1717171717171 "In Review"
//! taskdeck --json metrics Website
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    AddMemberArgs, CompareArgs, ExportArgs, InitArgs, ProjectAction, ProjectArgs,
    ProjectCreateArgs, ProjectEditArgs, ProjectTarget, RemoveMemberArgs, TaskAction, TaskAddArgs,
    TaskArgs, TaskMoveArgs, TaskRef, TaskUpdateArgs,
};

// Re-export types
pub use types::{PriorityArg, ProjectStatusArg, TaskStatusArg};

// Re-export validators for external use
pub use validators::{
    parse_date, parse_member, validate_description, validate_email, validate_key, validate_title,
};

/// Taskdeck - project and task tracking with a kanban board
///
/// Track projects, their teams and tasks, move tasks across board columns
/// and see completion, workload and health metrics.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a taskdeck workspace
    ///
    /// Creates the `.taskdeck/` directory with a configuration file and a
    /// data directory. Run this once in the directory you want to track.
    Init(InitArgs),

    /// Manage projects and their teams
    Project(ProjectArgs),

    /// Manage a project's tasks
    Task(TaskArgs),

    /// Show a project's board
    ///
    /// Lists the To Do, In Progress, In Review and Done columns with
    /// their task counts.
    Board(ProjectTarget),

    /// Show a project's metrics
    ///
    /// Completion, overdue tasks, priority and status distributions, team
    /// efficiency, workload balance and the composite health score.
    Metrics(ProjectTarget),

    /// Compare completion across all projects
    Compare(CompareArgs),

    /// Export a project report
    ///
    /// Prints the report, or writes it as JSON with `--output`.
    Export(ExportArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Project(args)) => {
                let mut app = open_app().await?;
                execute::execute_project(&mut app, args, output_mode).await
            }
            Some(Commands::Task(args)) => {
                let mut app = open_app().await?;
                execute::execute_task(&mut app, args, output_mode).await
            }
            Some(Commands::Board(args)) => {
                let mut app = open_app().await?;
                execute::execute_board(&mut app, args, output_mode)
            }
            Some(Commands::Metrics(args)) => {
                let mut app = open_app().await?;
                execute::execute_metrics(&mut app, args, output_mode)
            }
            Some(Commands::Compare(args)) => {
                let mut app = open_app().await?;
                execute::execute_compare(&mut app, args, output_mode)
            }
            Some(Commands::Export(args)) => {
                let mut app = open_app().await?;
                execute::execute_export(&mut app, args, output_mode).await
            }
            None => {
                println!("Taskdeck project tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

/// Open the workspace around the current directory, reporting any data
/// that had to be skipped while loading.
async fn open_app() -> Result<crate::app::App> {
    let app = crate::app::App::from_directory(&std::env::current_dir()?).await?;
    crate::output::print_load_warnings(app.load_warnings())?;
    Ok(app)
}
