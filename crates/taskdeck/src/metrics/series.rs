//! Chart-ready series: progress over time, status counts, comparisons.

use super::{completion_rate, percent};
use crate::domain::{Project, ProjectId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One point on the cumulative completion curve
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    /// When the task was completed
    pub completed_at: DateTime<Utc>,
    /// Share of all tasks completed up to and including this point
    pub percent: f64,
}

/// Cumulative completion curve.
///
/// One point per completed task, ordered by completion time. The n-th
/// point is `n / total_tasks * 100`, so the curve ends at the completion
/// rate rather than at 100.
pub fn progress_series(project: &Project) -> Vec<ProgressPoint> {
    let mut completions: Vec<DateTime<Utc>> = project
        .tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.completed_at)
        .collect();
    completions.sort_unstable();

    let total = project.tasks.len();
    completions
        .into_iter()
        .enumerate()
        .map(|(index, completed_at)| ProgressPoint {
            completed_at,
            percent: percent(index + 1, total),
        })
        .collect()
}

/// Completion rate of one project, for side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    /// The project
    pub project_id: ProjectId,
    /// Project name
    pub name: String,
    /// Completion rate in percent
    pub progress: f64,
}

/// Completion rate of every project, in the given order.
pub fn project_comparison(projects: &[Project]) -> Vec<ProjectProgress> {
    projects
        .iter()
        .map(|p| ProjectProgress {
            project_id: p.id,
            name: p.name.clone(),
            progress: completion_rate(p),
        })
        .collect()
}

/// Task count in one board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    /// The column
    pub status: TaskStatus,
    /// Tasks in the column
    pub count: usize,
}

/// Task count per status, in board column order.
///
/// Every status is listed, including empty ones.
pub fn status_distribution(project: &Project) -> Vec<StatusCount> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: project.tasks.iter().filter(|t| t.status == status).count(),
        })
        .collect()
}

/// A named value in a chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledValue {
    /// Series label
    pub label: String,
    /// Value
    pub value: f64,
}

/// Assigned task count per team member, labeled by name.
pub fn team_workload(project: &Project) -> Vec<LabeledValue> {
    project
        .team
        .iter()
        .map(|member| LabeledValue {
            label: member.name.clone(),
            value: project.tasks_assigned_to(member.id).count() as f64,
        })
        .collect()
}
