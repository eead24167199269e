//! Composite project health score.

use super::{completion_rate, overdue_tasks, percent, workload_distribution};
use crate::domain::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Qualitative bucket for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    /// 80 and above
    Excellent,
    /// 60 to 80
    Good,
    /// 40 to 60
    Fair,
    /// Below 40
    Poor,
}

impl HealthStatus {
    /// Bucket a score.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthStatus::Excellent
        } else if score >= 60.0 {
            HealthStatus::Good
        } else if score >= 40.0 {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input to the health score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactor {
    /// Factor name
    pub name: &'static str,
    /// Sub-score, 0-100
    pub score: f64,
    /// Bucket for the sub-score
    pub status: HealthStatus,
}

impl HealthFactor {
    fn new(name: &'static str, score: f64) -> Self {
        Self {
            name,
            score,
            status: HealthStatus::from_score(score),
        }
    }
}

/// Overall health with the factors it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealth {
    /// Rounded mean of the factor scores
    pub score: u32,
    /// Bucket for the overall score
    pub status: HealthStatus,
    /// Task Completion, Timeline and Workload Balance, in that order
    pub factors: Vec<HealthFactor>,
}

/// Factor name for the completion rate
pub const TASK_COMPLETION: &str = "Task Completion";
/// Factor name for the share of tasks not overdue
pub const TIMELINE: &str = "Timeline";
/// Factor name for the workload balance score
pub const WORKLOAD_BALANCE: &str = "Workload Balance";

/// Compute project health as of `now`.
///
/// The three factors are the completion rate, `100 - overdue rate` and
/// the workload balance score. The overall score is their mean, rounded
/// to the nearest integer.
pub fn project_health(project: &Project, now: DateTime<Utc>) -> ProjectHealth {
    let overdue_rate = percent(overdue_tasks(project, now), project.tasks.len());

    let factors = vec![
        HealthFactor::new(TASK_COMPLETION, completion_rate(project)),
        HealthFactor::new(TIMELINE, 100.0 - overdue_rate),
        HealthFactor::new(
            WORKLOAD_BALANCE,
            workload_distribution(project).balance_score,
        ),
    ];

    let mean = factors.iter().map(|f| f.score).sum::<f64>() / factors.len() as f64;

    // Factor scores are within 0..=100
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = mean.round() as u32;

    tracing::trace!(project = %project.id, score, "Computed project health");

    ProjectHealth {
        score,
        status: HealthStatus::from_score(f64::from(score)),
        factors,
    }
}
