//! Project reports for export.

use crate::domain::{Priority, Project, ProjectId, ProjectStatus, TaskStatus};
use crate::metrics::{self, HealthStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Headline numbers for a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Number of tasks
    pub total_tasks: usize,
    /// Number of completed tasks
    pub completed_tasks: usize,
    /// Completed tasks in percent
    pub completion_rate: f64,
    /// Incomplete tasks past their due date
    pub overdue_tasks: usize,
    /// Composite health score, 0-100
    pub health_score: u32,
    /// Bucket for the health score
    pub health_status: HealthStatus,
}

/// One task, flattened for a table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// Task title
    pub title: String,
    /// Board column
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Due date
    pub due_date: NaiveDate,
    /// Completion flag
    pub completed: bool,
    /// Names of assignees that resolve to team members
    pub assignees: Vec<String>,
}

/// A self-contained snapshot of one project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    /// The project
    pub project_id: ProjectId,
    /// Project name
    pub project_name: String,
    /// Project status
    pub status: ProjectStatus,
    /// Project deadline
    pub deadline: NaiveDate,
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Headline numbers
    pub summary: ExportSummary,
    /// One row per task, in project order
    pub tasks: Vec<ExportRow>,
}

impl ExportReport {
    /// Build a report for `project` as of `now`.
    pub fn build(project: &Project, now: DateTime<Utc>) -> Self {
        let health = metrics::project_health(project, now);

        let tasks = project
            .tasks
            .iter()
            .map(|task| ExportRow {
                title: task.title.clone(),
                status: task.status,
                priority: task.priority,
                due_date: task.due_date,
                completed: task.completed,
                assignees: task
                    .assignees
                    .iter()
                    .filter_map(|a| project.member(a.id))
                    .map(|m| m.name.clone())
                    .collect(),
            })
            .collect();

        Self {
            project_id: project.id,
            project_name: project.name.clone(),
            status: project.status,
            deadline: project.deadline,
            generated_at: now,
            summary: ExportSummary {
                total_tasks: project.tasks.len(),
                completed_tasks: project.completed_count(),
                completion_rate: metrics::completion_rate(project),
                overdue_tasks: metrics::overdue_tasks(project, now),
                health_score: health.score,
                health_status: health.status,
            },
            tasks,
        }
    }

    /// Suggested file name: `<project-slug>-YYYY-MM-DD.json`.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}.json",
            slugify(&self.project_name),
            self.generated_at.format("%Y-%m-%d")
        )
    }

    /// Render the report as a plain-text document.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        // Writing to a String cannot fail
        let _ = writeln!(out, "Project Report: {}", self.project_name);
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out, "Status: {}", self.status);
        let _ = writeln!(out, "Deadline: {}", self.deadline);
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary");
        let _ = writeln!(out, "  Tasks: {} ({} completed)", s.total_tasks, s.completed_tasks);
        let _ = writeln!(out, "  Completion: {:.1}%", s.completion_rate);
        let _ = writeln!(out, "  Overdue: {}", s.overdue_tasks);
        let _ = writeln!(out, "  Health: {} ({})", s.health_score, s.health_status);
        let _ = writeln!(out);
        let _ = writeln!(out, "Tasks");

        if self.tasks.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for row in &self.tasks {
            let mark = if row.completed { "x" } else { " " };
            let _ = write!(
                out,
                "  [{mark}] {} | {} | {} | due {}",
                row.title, row.status, row.priority, row.due_date
            );
            if !row.assignees.is_empty() {
                let _ = write!(out, " | {}", row.assignees.join(", "));
            }
            let _ = writeln!(out);
        }

        out
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemberId, MemberRef, NewTask, NewTeamMember, TaskId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap()
    }

    fn project() -> Project {
        let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut done = NewTask::new("Wireframes", due).into_task(TaskId(2), now());
        done.complete(now());
        let mut open = NewTask::new("Copy", due).into_task(TaskId(3), now());
        open.assignees = vec![MemberRef::from(MemberId(1)), MemberRef::from(MemberId(99))];

        Project {
            id: ProjectId(1),
            name: "Website Relaunch!".to_string(),
            description: "New site".to_string(),
            status: ProjectStatus::InProgress,
            deadline: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            team: vec![NewTeamMember {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: String::new(),
            }
            .into_member(MemberId(1))],
            tasks: vec![done, open],
            created_at: now(),
        }
    }

    #[test]
    fn summarizes_project() {
        let report = ExportReport::build(&project(), now());

        assert_eq!(report.summary.total_tasks, 2);
        assert_eq!(report.summary.completed_tasks, 1);
        assert_eq!(report.summary.completion_rate, 50.0);
        assert_eq!(report.summary.overdue_tasks, 1);
    }

    #[test]
    fn rows_list_resolved_assignee_names() {
        let report = ExportReport::build(&project(), now());
        assert_eq!(report.tasks[1].assignees, ["Ada"]);
        assert!(report.tasks[0].completed);
    }

    #[test]
    fn file_name_uses_slug_and_date() {
        let report = ExportReport::build(&project(), now());
        assert_eq!(report.file_name(), "website-relaunch-2024-05-04.json");
    }

    #[rstest]
    #[case("Website Relaunch!", "website-relaunch")]
    #[case("  Q3 -- Roadmap ", "q3-roadmap")]
    #[case("???", "project")]
    fn slugs(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[test]
    fn text_document_lists_tasks() {
        let text = ExportReport::build(&project(), now()).to_text();

        assert!(text.starts_with("Project Report: Website Relaunch!"));
        assert!(text.contains("Completion: 50.0%"));
        assert!(text.contains("[x] Wireframes"));
        assert!(text.contains("Copy | To Do | medium | due 2024-01-01 | Ada"));
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_value(ExportReport::build(&project(), now())).unwrap();
        assert_eq!(json["summary"]["completionRate"], 50.0);
        assert_eq!(json["tasks"][0]["dueDate"], "2024-01-01");
    }
}
