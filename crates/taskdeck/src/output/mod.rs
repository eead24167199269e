//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or pretty-printed JSON
//! (`--json`). Text rendering goes through `write_*` functions that take
//! any [`Write`] and an [`OutputConfig`], so it can be tested against a
//! buffer; the `print_*` wrappers bind them to stdout.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, bars, marks)

pub mod color;

use crate::board::Board;
use crate::domain::{Project, Task, TeamMember};
use crate::export::ExportReport;
use crate::metrics::{self, ProjectMetrics, ProjectProgress};
use crate::storage::LoadWarning;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{
    bold, colorize_id, colorize_priority, colorize_project_status, colorize_task_status,
    completion_mark, dimmed, health_color, progress_bar, progress_color,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;
const PROGRESS_BAR_WIDTH: usize = 20;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only symbols instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `TASKDECK_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `TASKDECK_ASCII`: Set to "1" or "true" for ASCII-only symbols
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TASKDECK_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a configuration from a variable lookup.
    ///
    /// Invalid values are logged and replaced by the default.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match var("TASKDECK_MAX_WIDTH") {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) if width > 0 => width,
                _ => {
                    tracing::warn!(
                        env_var = "TASKDECK_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match var("TASKDECK_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "TASKDECK_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // NO_COLOR (https://no-color.org/) wins over TASKDECK_COLOR
        let use_colors = var("NO_COLOR").is_none()
            && var("TASKDECK_COLOR").is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| usize::from(w.0))
}

fn content_width(config: &OutputConfig) -> usize {
    get_terminal_width().min(config.max_width)
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

/// Completion percentage rounded half up to a whole number.
fn rounded_percent(value: f64) -> String {
    format!("{}%", value.round())
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Report recovered load problems on stderr.
pub fn print_load_warnings(warnings: &[LoadWarning]) -> io::Result<()> {
    let config = OutputConfig::from_env();
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    for w in warnings {
        writeln!(handle, "{} {w}", warning("warning:", &config))?;
    }
    Ok(())
}

/// Print the project list
pub fn print_projects(projects: &[Project], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&projects),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_projects(&mut stdout.lock(), projects, &OutputConfig::from_env())
        }
    }
}

/// Print one project with its team and tasks
pub fn print_project_details(
    project: &Project,
    now: DateTime<Utc>,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(project),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_project_details(&mut stdout.lock(), project, now, &OutputConfig::from_env())
        }
    }
}

/// Print one task
pub fn print_task(task: &Task, project: &Project, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(task),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_task(&mut stdout.lock(), task, project, &OutputConfig::from_env())
        }
    }
}

/// Print a team member
pub fn print_member(member: &TeamMember, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(member),
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            print_message(&format!(
                "{} {} <{}> {}",
                colorize_id(member.id, &config),
                member.name,
                member.email,
                dimmed(&member.role, &config)
            ))
        }
    }
}

/// Print a project's board
pub fn print_board(project: &Project, mode: OutputMode) -> io::Result<()> {
    let board = Board::of(project);
    match mode {
        OutputMode::Json => print_json(&board),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_board(&mut stdout.lock(), project, &board, &OutputConfig::from_env())
        }
    }
}

/// Print the full metrics bundle for a project
pub fn print_metrics(
    project: &Project,
    metrics: &ProjectMetrics,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(metrics),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_metrics(&mut stdout.lock(), project, metrics, &OutputConfig::from_env())
        }
    }
}

/// Print the completion comparison of all projects
pub fn print_comparison(comparison: &[ProjectProgress], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&comparison),
        OutputMode::Text => {
            let stdout = io::stdout();
            write_comparison(&mut stdout.lock(), comparison, &OutputConfig::from_env())
        }
    }
}

/// Print an export report
pub fn print_report(report: &ExportReport, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(report),
        OutputMode::Text => print_message(report.to_text().trim_end()),
    }
}

// ============================================================================
// Text Formatting
// ============================================================================

fn write_projects<W: Write>(
    w: &mut W,
    projects: &[Project],
    config: &OutputConfig,
) -> io::Result<()> {
    if projects.is_empty() {
        writeln!(w, "No projects yet. Create one with 'taskdeck project create'.")?;
        return Ok(());
    }

    writeln!(w, "{} project(s):", projects.len())?;
    writeln!(w)?;

    for project in projects {
        let progress = metrics::completion_rate(project);
        writeln!(
            w,
            "{} {}  {}",
            colorize_id(project.id, config),
            bold(&project.name, config),
            colorize_project_status(project.status, config)
        )?;
        writeln!(
            w,
            "  {} {}  {} tasks  {} {}  {} {}",
            progress_bar(progress, PROGRESS_BAR_WIDTH, config),
            progress_color(&rounded_percent(progress), progress, config),
            project.tasks.len(),
            dimmed("Team:", config),
            project.team.len(),
            dimmed("Due:", config),
            project.deadline
        )?;
    }

    Ok(())
}

fn write_project_details<W: Write>(
    w: &mut W,
    project: &Project,
    now: DateTime<Utc>,
    config: &OutputConfig,
) -> io::Result<()> {
    let width = content_width(config);
    let progress = metrics::completion_rate(project);

    writeln!(
        w,
        "{}: {}",
        colorize_id(project.id, config),
        bold(&project.name, config)
    )?;
    writeln!(
        w,
        "{}  {}    {}  {}    {}  {}",
        dimmed("Status:", config),
        colorize_project_status(project.status, config),
        dimmed("Deadline:", config),
        project.deadline,
        dimmed("Progress:", config),
        progress_color(&rounded_percent(progress), progress, config)
    )?;
    writeln!(
        w,
        "{} {}",
        dimmed("Created:", config),
        project.created_at.format("%Y-%m-%d %H:%M")
    )?;

    writeln!(w)?;
    for line in wrap_text(&project.description, width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Team", config), project.team.len())?;
    if project.team.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
    }
    for member in &project.team {
        writeln!(
            w,
            "  {} {} <{}> {}",
            colorize_id(member.id, config),
            member.name,
            member.email,
            dimmed(&member.role, config)
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Tasks", config), project.tasks.len())?;
    if project.tasks.is_empty() {
        writeln!(w, "  {}", dimmed("(none)", config))?;
    }
    for task in &project.tasks {
        write!(w, "  ")?;
        write_task_line(w, task, project, config)?;
        if task.is_overdue(now) {
            write!(w, " {}", color::error("overdue", config))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// One-line task summary without the trailing newline.
fn write_task_line<W: Write>(
    w: &mut W,
    task: &Task,
    project: &Project,
    config: &OutputConfig,
) -> io::Result<()> {
    write!(
        w,
        "{} {} {}  {}  {}  {} {}",
        completion_mark(task.completed, config),
        colorize_id(task.id, config),
        task.title,
        colorize_task_status(task.status, config),
        colorize_priority(task.priority, config),
        dimmed("due", config),
        task.due_date
    )?;

    let names = assignee_names(task, project);
    if !names.is_empty() {
        write!(w, "  {}", names.join(", "))?;
    }
    Ok(())
}

fn write_task<W: Write>(
    w: &mut W,
    task: &Task,
    project: &Project,
    config: &OutputConfig,
) -> io::Result<()> {
    write_task_line(w, task, project, config)?;
    writeln!(w)?;

    if !task.description.is_empty() {
        for line in wrap_text(&task.description, content_width(config).saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }
    if let Some(done) = task.completed_at {
        writeln!(
            w,
            "  {} {}",
            dimmed("Completed:", config),
            done.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

fn assignee_names<'a>(task: &Task, project: &'a Project) -> Vec<&'a str> {
    task.assignees
        .iter()
        .filter_map(|a| project.member(a.id))
        .map(|m| m.name.as_str())
        .collect()
}

fn write_board<W: Write>(
    w: &mut W,
    project: &Project,
    board: &Board<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} {}", bold("Board:", config), project.name)?;

    for column in &board.columns {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({})",
            bold(&colorize_task_status(column.status, config), config),
            column.count
        )?;
        if column.tasks.is_empty() {
            writeln!(w, "  {}", dimmed("(empty)", config))?;
        }
        for task in &column.tasks {
            writeln!(
                w,
                "  {} {} {}  {}",
                completion_mark(task.completed, config),
                colorize_id(task.id, config),
                task.title,
                colorize_priority(task.priority, config)
            )?;
        }
    }

    Ok(())
}

fn write_metrics<W: Write>(
    w: &mut W,
    project: &Project,
    m: &ProjectMetrics,
    config: &OutputConfig,
) -> io::Result<()> {
    let health = f64::from(m.health.score);

    writeln!(w, "{} {}", bold("Metrics:", config), project.name)?;
    writeln!(w)?;
    writeln!(
        w,
        "{} {} ({})",
        dimmed("Health:", config),
        health_color(&m.health.score.to_string(), health, config),
        health_color(m.health.status.as_str(), health, config)
    )?;
    for factor in &m.health.factors {
        writeln!(
            w,
            "  {:<18} {:>5.1}  {}",
            factor.name,
            factor.score,
            health_color(factor.status.as_str(), factor.score, config)
        )?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {}/{} ({:.1}%)",
        dimmed("Completed:", config),
        m.completed_tasks,
        m.total_tasks,
        m.completion_rate
    )?;
    writeln!(w, "{} {}", dimmed("Overdue:", config), m.overdue_tasks)?;
    writeln!(
        w,
        "{} {:.1} days",
        dimmed("Average completion:", config),
        m.average_completion_days
    )?;
    writeln!(
        w,
        "{} {} on time, {} late",
        dimmed("Timeliness:", config),
        m.timeliness.on_time,
        m.timeliness.late
    )?;
    writeln!(
        w,
        "{} {:.1}",
        dimmed("Tasks per member:", config),
        m.tasks_per_member
    )?;

    writeln!(w)?;
    writeln!(w, "{}", bold("Priorities", config))?;
    if m.priority_distribution.is_empty() {
        writeln!(w, "  {}", dimmed("(no tasks)", config))?;
    }
    for share in &m.priority_distribution {
        writeln!(
            w,
            "  {:<8} {:>3}  {:.1}%",
            colorize_priority(share.priority, config),
            share.count,
            share.percentage
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{}", bold("Columns", config))?;
    for column in &m.status_distribution {
        writeln!(
            w,
            "  {:<12} {:>3}",
            column.status.as_str(),
            column.count
        )?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {:.1}%  {} {}  {} {}",
        bold("Team efficiency", config),
        m.team_efficiency.score,
        dimmed("Top performer:", config),
        m.team_efficiency.top_performer_name,
        dimmed("Most active:", config),
        m.most_active_member
    )?;
    for member in &m.team_efficiency.members {
        writeln!(
            w,
            "  {:<20} {}/{} done  {:.1}%",
            member.name, member.completed, member.assigned, member.completion_rate
        )?;
    }
    writeln!(
        w,
        "{} {:.1}",
        dimmed("Workload balance:", config),
        m.workload.balance_score
    )?;

    if !m.progress.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", bold("Progress", config))?;
        for point in &m.progress {
            writeln!(
                w,
                "  {}  {:.1}%",
                point.completed_at.format("%Y-%m-%d"),
                point.percent
            )?;
        }
    }

    Ok(())
}

fn write_comparison<W: Write>(
    w: &mut W,
    comparison: &[ProjectProgress],
    config: &OutputConfig,
) -> io::Result<()> {
    if comparison.is_empty() {
        writeln!(w, "No projects to compare.")?;
        return Ok(());
    }

    let name_width = comparison
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    for entry in comparison {
        writeln!(
            w,
            "{:<name_width$}  {} {}",
            entry.name,
            progress_bar(entry.progress, PROGRESS_BAR_WIDTH, config),
            progress_color(&format!("{:.1}%", entry.progress), entry.progress, config)
        )?;
    }
    Ok(())
}
