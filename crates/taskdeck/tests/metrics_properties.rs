//! Property-based tests for the metrics engine and task patches.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use taskdeck::board::Board;
use taskdeck::domain::{
    MemberId, MemberRef, Priority, Project, ProjectId, ProjectStatus, Task, TaskId, TaskPatch,
    TaskStatus, TeamMember,
};
use taskdeck::metrics::{self, ProjectMetrics, NOT_AVAILABLE};

/// Shape of one generated task.
#[derive(Debug, Clone)]
struct TaskSpec {
    status: usize,
    priority: usize,
    due_offset: i64,
    done_after: Option<i64>,
    assignees: Vec<i64>,
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn task_spec(team_size: i64) -> impl Strategy<Value = TaskSpec> {
    (
        0..4usize,
        0..3usize,
        -30..60i64,
        proptest::option::of(0..90i64),
        // One past the team size produces a dangling assignee
        proptest::collection::vec(1..=team_size + 1, 0..3),
    )
        .prop_map(|(status, priority, due_offset, done_after, assignees)| TaskSpec {
            status,
            priority,
            due_offset,
            done_after,
            assignees,
        })
}

fn project_strategy() -> impl Strategy<Value = Project> {
    (0..5i64).prop_flat_map(|team_size| {
        proptest::collection::vec(task_spec(team_size), 0..12)
            .prop_map(move |specs| build_project(team_size, &specs))
    })
}

fn build_project(team_size: i64, specs: &[TaskSpec]) -> Project {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let team = (1..=team_size)
        .map(|id| TeamMember {
            id: MemberId(id),
            name: format!("Member {id}"),
            email: format!("m{id}@example.com"),
            role: String::new(),
            avatar: String::new(),
        })
        .collect();

    let tasks = specs
        .iter()
        .zip(100..)
        .map(|(spec, id)| {
            let done_at = spec.done_after.map(|days| base() + Duration::days(days));
            Task {
                id: TaskId(id),
                title: format!("Task {id}"),
                description: String::new(),
                status: TaskStatus::ALL[spec.status],
                priority: Priority::ALL[spec.priority],
                due_date: start + Duration::days(spec.due_offset),
                created_at: base(),
                completed: done_at.is_some(),
                completed_at: done_at,
                assignees: spec
                    .assignees
                    .iter()
                    .map(|m| MemberRef::from(MemberId(*m)))
                    .collect(),
            }
        })
        .collect();

    Project {
        id: ProjectId(1),
        name: "Generated".to_string(),
        description: "Generated project".to_string(),
        status: ProjectStatus::InProgress,
        deadline: start,
        team,
        tasks,
        created_at: base(),
    }
}

fn in_percent_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

proptest! {
    #[test]
    fn metrics_stay_in_range(project in project_strategy(), days in 0..120i64) {
        let now = base() + Duration::days(days);
        let m = ProjectMetrics::compute(&project, now);

        prop_assert!(in_percent_range(m.completion_rate));
        prop_assert!(in_percent_range(m.team_efficiency.score));
        prop_assert!(in_percent_range(m.workload.balance_score));
        prop_assert!(m.health.score <= 100);
        prop_assert!(m.average_completion_days.is_finite());
        prop_assert!(m.tasks_per_member.is_finite());
        prop_assert!(m.overdue_tasks <= m.total_tasks - m.completed_tasks);
        for factor in &m.health.factors {
            prop_assert!(in_percent_range(factor.score));
        }
        for point in &m.progress {
            prop_assert!(in_percent_range(point.percent));
        }
    }

    #[test]
    fn distributions_account_for_every_task(project in project_strategy()) {
        let m = ProjectMetrics::compute(&project, base());

        let by_priority: usize = m.priority_distribution.iter().map(|s| s.count).sum();
        let by_status: usize = m.status_distribution.iter().map(|s| s.count).sum();
        prop_assert_eq!(by_priority, project.tasks.len());
        prop_assert_eq!(by_status, project.tasks.len());
        prop_assert_eq!(Board::of(&project).total(), project.tasks.len());
        prop_assert_eq!(m.timeliness.on_time + m.timeliness.late, m.completed_tasks);
    }

    #[test]
    fn zero_tasks_score_zero_completion(team_size in 0..5i64) {
        let project = build_project(team_size, &[]);
        let m = ProjectMetrics::compute(&project, base());

        prop_assert_eq!(m.completion_rate, 0.0);
        prop_assert_eq!(m.health.factors[0].score, 0.0);
        prop_assert!(m.progress.is_empty());
    }

    #[test]
    fn top_performer_is_on_the_team(project in project_strategy()) {
        let efficiency = metrics::team_efficiency(&project);

        match efficiency.top_performer {
            Some(id) => {
                let member = project.member(id);
                prop_assert!(member.is_some());
                prop_assert_eq!(&efficiency.top_performer_name, &member.unwrap().name);
            }
            None => {
                prop_assert!(project.team.is_empty());
                prop_assert_eq!(efficiency.top_performer_name.as_str(), NOT_AVAILABLE);
            }
        }
    }

    #[test]
    fn completion_timestamp_follows_flag(
        project in project_strategy(),
        steps in proptest::collection::vec((proptest::option::of(any::<bool>()), proptest::option::of(0..4usize)), 1..8),
    ) {
        let mut project = project;
        let now = base() + Duration::days(200);

        for task in &mut project.tasks {
            for (completed, status) in &steps {
                let patch = TaskPatch {
                    completed: *completed,
                    status: status.map(|i| TaskStatus::ALL[i]),
                    ..TaskPatch::default()
                };
                patch.apply_to(task, now);
                prop_assert_eq!(task.completed, task.completed_at.is_some());
            }
        }
    }

    #[test]
    fn moving_twice_equals_moving_once(project in project_strategy(), target in 0..4usize) {
        let status = TaskStatus::ALL[target];
        let now = base();

        for task in &project.tasks {
            let mut once = task.clone();
            taskdeck::board::move_patch(status).apply_to(&mut once, now);
            let mut twice = once.clone();
            taskdeck::board::move_patch(status).apply_to(&mut twice, now);

            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.status, status);
            prop_assert_eq!(once.completed, task.completed);
        }
    }
}
