//! Derived project statistics.
//!
//! Every function here is pure: it reads a [`Project`] (or a slice of
//! projects) and returns numbers. Anything that depends on the current
//! time takes `now` explicitly, so results are reproducible.
//!
//! Percentages are in the range `0.0..=100.0`. Whenever a denominator is
//! zero (no tasks, no team, nothing assigned) the result is `0.0`, never
//! `NaN`.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Utc};
//! use taskdeck::domain::{Project, ProjectId, ProjectStatus};
//! use taskdeck::metrics;
//!
//! let project = Project {
//!     id: ProjectId(1),
//!     name: "Empty".to_string(),
//!     description: "Nothing yet".to_string(),
//!     status: ProjectStatus::NotStarted,
//!     deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
//!     team: vec![],
//!     tasks: vec![],
//!     created_at: Utc::now(),
//! };
//!
//! assert_eq!(metrics::completion_rate(&project), 0.0);
//! assert_eq!(metrics::overdue_tasks(&project, Utc::now()), 0);
//! ```

#![allow(clippy::cast_precision_loss)]

mod health;
mod series;
mod team;

pub use health::{project_health, HealthFactor, HealthStatus, ProjectHealth};
pub use series::{
    progress_series, project_comparison, status_distribution, team_workload, LabeledValue,
    ProgressPoint, ProjectProgress, StatusCount,
};
pub use team::{
    most_active_member, team_efficiency, workload_distribution, MemberEfficiency,
    MemberWorkload, TeamEfficiency, WorkloadDistribution,
};

use crate::domain::{start_of_day, Priority, Project, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder shown where a member name is expected but the team is empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Percentage of tasks marked completed.
pub fn completion_rate(project: &Project) -> f64 {
    percent(project.completed_count(), project.tasks.len())
}

/// Number of incomplete tasks whose due date is before `now`.
pub fn overdue_tasks(project: &Project, now: DateTime<Utc>) -> usize {
    project.tasks.iter().filter(|t| t.is_overdue(now)).count()
}

/// Task count and share of total for one priority
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityShare {
    /// The priority
    pub priority: Priority,
    /// Tasks with this priority
    pub count: usize,
    /// Share of all tasks, in percent
    pub percentage: f64,
}

/// Count and percentage of tasks per priority, highest priority first.
///
/// Priorities with no tasks are omitted.
pub fn priority_distribution(project: &Project) -> Vec<PriorityShare> {
    let total = project.tasks.len();
    Priority::ALL
        .into_iter()
        .filter_map(|priority| {
            let count = project
                .tasks
                .iter()
                .filter(|t| t.priority == priority)
                .count();
            (count > 0).then(|| PriorityShare {
                priority,
                count,
                percentage: percent(count, total),
            })
        })
        .collect()
}

/// Mean days from creation to completion over completed tasks.
///
/// Tasks that are not completed, or lack a completion timestamp, are
/// skipped. Returns 0 when no task qualifies.
pub fn average_completion_time(tasks: &[Task]) -> f64 {
    let durations: Vec<f64> = tasks.iter().filter_map(Task::completion_days).collect();
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

/// Average number of tasks per team member, 0 for an empty team.
pub fn tasks_per_member(project: &Project) -> f64 {
    if project.team.is_empty() {
        return 0.0;
    }
    project.tasks.len() as f64 / project.team.len() as f64
}

/// Completed tasks split by whether they finished by their due date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeliness {
    /// Completed no later than the start of the due date
    pub on_time: usize,
    /// Completed after the start of the due date
    pub late: usize,
}

/// Split completed tasks into on-time and late completions.
///
/// A completion counts as on time when it happened no later than midnight
/// UTC at the start of the due date.
pub fn completion_timeliness(project: &Project) -> Timeliness {
    project
        .tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.completed_at.map(|done| (done, start_of_day(t.due_date))))
        .fold(Timeliness::default(), |mut acc, (done, due)| {
            if done <= due {
                acc.on_time += 1;
            } else {
                acc.late += 1;
            }
            acc
        })
}

/// Every metric for one project, computed at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    /// Number of tasks
    pub total_tasks: usize,
    /// Number of completed tasks
    pub completed_tasks: usize,
    /// Completed tasks in percent
    pub completion_rate: f64,
    /// Incomplete tasks past their due date
    pub overdue_tasks: usize,
    /// Tasks per priority
    pub priority_distribution: Vec<PriorityShare>,
    /// Tasks per board column
    pub status_distribution: Vec<StatusCount>,
    /// Mean days from creation to completion
    pub average_completion_days: f64,
    /// Tasks divided by team size
    pub tasks_per_member: f64,
    /// On-time versus late completions
    pub timeliness: Timeliness,
    /// Per-member completion rates
    pub team_efficiency: TeamEfficiency,
    /// Per-member assignment counts and balance
    pub workload: WorkloadDistribution,
    /// Name of the member with the most completed tasks
    pub most_active_member: String,
    /// Composite health score
    pub health: ProjectHealth,
    /// Cumulative completion curve
    pub progress: Vec<ProgressPoint>,
}

impl ProjectMetrics {
    /// Compute every metric for `project` as of `now`.
    pub fn compute(project: &Project, now: DateTime<Utc>) -> Self {
        Self {
            total_tasks: project.tasks.len(),
            completed_tasks: project.completed_count(),
            completion_rate: completion_rate(project),
            overdue_tasks: overdue_tasks(project, now),
            priority_distribution: priority_distribution(project),
            status_distribution: status_distribution(project),
            average_completion_days: average_completion_time(&project.tasks),
            tasks_per_member: tasks_per_member(project),
            timeliness: completion_timeliness(project),
            team_efficiency: team_efficiency(project),
            workload: workload_distribution(project),
            most_active_member: most_active_member(project)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |m| m.name.clone()),
            health: project_health(project, now),
            progress: progress_series(project),
        }
    }
}
