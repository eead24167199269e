//! Per-member metrics: efficiency, workload and activity.

use super::{percent, NOT_AVAILABLE};
use crate::domain::{MemberId, Project, TeamMember};
use serde::Serialize;

/// Completion figures for one team member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEfficiency {
    /// The member
    pub member_id: MemberId,
    /// Display name
    pub name: String,
    /// Tasks assigned to the member
    pub assigned: usize,
    /// Assigned tasks that are completed
    pub completed: usize,
    /// `completed / assigned` in percent, 0 when nothing is assigned
    pub completion_rate: f64,
}

/// Team-wide efficiency summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEfficiency {
    /// Mean of the members' completion rates, in percent
    pub score: f64,
    /// Member with the highest completion rate
    pub top_performer: Option<MemberId>,
    /// Name of the top performer, or `N/A` for an empty team
    pub top_performer_name: String,
    /// Per-member figures in team order
    pub members: Vec<MemberEfficiency>,
}

/// Mean per-member completion rate and the top performer.
///
/// Each member's rate is completed assigned tasks over assigned tasks (0
/// when nothing is assigned). Ties for top performer go to the member
/// listed first on the team. An empty team scores 0 with no top performer.
pub fn team_efficiency(project: &Project) -> TeamEfficiency {
    let members: Vec<MemberEfficiency> = project
        .team
        .iter()
        .map(|member| {
            let (assigned, completed) = project
                .tasks_assigned_to(member.id)
                .fold((0, 0), |(a, c), t| (a + 1, c + usize::from(t.completed)));
            MemberEfficiency {
                member_id: member.id,
                name: member.name.clone(),
                assigned,
                completed,
                completion_rate: percent(completed, assigned),
            }
        })
        .collect();

    let score = if members.is_empty() {
        0.0
    } else {
        members.iter().map(|m| m.completion_rate).sum::<f64>() / members.len() as f64
    };

    let mut top: Option<&MemberEfficiency> = None;
    for member in &members {
        // Strictly greater keeps the earliest member on ties
        if top.is_none_or(|best| member.completion_rate > best.completion_rate) {
            top = Some(member);
        }
    }

    TeamEfficiency {
        score,
        top_performer: top.map(|m| m.member_id),
        top_performer_name: top.map_or_else(|| NOT_AVAILABLE.to_string(), |m| m.name.clone()),
        members,
    }
}

/// Assigned task count for one team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberWorkload {
    /// The member
    pub member_id: MemberId,
    /// Display name
    pub name: String,
    /// Tasks assigned to the member
    pub assigned: usize,
}

/// How evenly tasks are spread over the team
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDistribution {
    /// Per-member assignment counts in team order
    pub members: Vec<MemberWorkload>,
    /// 100 for a perfectly even spread, lower as it skews
    pub balance_score: f64,
}

/// Per-member assignment counts and a balance score.
///
/// The balance score is `100 - max_deviation / total_tasks * 100`, where
/// `max_deviation` is the largest absolute difference between a member's
/// assigned count and the team mean. With zero tasks the deviation term
/// is 0, so a non-empty team scores 100. An empty team scores 0.
pub fn workload_distribution(project: &Project) -> WorkloadDistribution {
    let members: Vec<MemberWorkload> = project
        .team
        .iter()
        .map(|member| MemberWorkload {
            member_id: member.id,
            name: member.name.clone(),
            assigned: project.tasks_assigned_to(member.id).count(),
        })
        .collect();

    if members.is_empty() {
        return WorkloadDistribution {
            members,
            balance_score: 0.0,
        };
    }

    let counts: Vec<f64> = members.iter().map(|m| m.assigned as f64).collect();
    let mean = counts.iter().sum::<f64>() / counts.len() as f64;
    let max_deviation = counts
        .iter()
        .map(|c| (c - mean).abs())
        .fold(0.0_f64, f64::max);

    let total = project.tasks.len();
    let skew = if total == 0 {
        0.0
    } else {
        max_deviation / total as f64 * 100.0
    };

    WorkloadDistribution {
        members,
        balance_score: 100.0 - skew,
    }
}

/// The team member with the most completed assigned tasks.
///
/// Ties go to the member listed first. `None` for an empty team.
pub fn most_active_member(project: &Project) -> Option<&TeamMember> {
    let mut best: Option<(&TeamMember, usize)> = None;
    for member in &project.team {
        let completed = project
            .tasks_assigned_to(member.id)
            .filter(|t| t.completed)
            .count();
        if best.is_none_or(|(_, most)| completed > most) {
            best = Some((member, completed));
        }
    }
    best.map(|(member, _)| member)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{assigned, at, done, member, project, task};
    use super::*;

    #[test]
    fn efficiency_averages_member_rates() {
        // A finished 3 of 3, B finished 0 of 1
        let p = project(
            vec![member(10, "A"), member(20, "B")],
            vec![
                done(assigned(task(1), &[10]), at(2024, 1, 2)),
                done(assigned(task(2), &[10]), at(2024, 1, 2)),
                done(assigned(task(3), &[10]), at(2024, 1, 2)),
                assigned(task(4), &[20]),
            ],
        );

        let eff = team_efficiency(&p);

        assert_eq!(eff.score, 50.0);
        assert_eq!(eff.top_performer, Some(MemberId(10)));
        assert_eq!(eff.top_performer_name, "A");
        assert_eq!(eff.members[0].completion_rate, 100.0);
        assert_eq!(eff.members[1].completion_rate, 0.0);
    }

    #[test]
    fn efficiency_of_empty_team_is_zero() {
        let eff = team_efficiency(&project(vec![], vec![task(1)]));

        assert_eq!(eff.score, 0.0);
        assert_eq!(eff.top_performer, None);
        assert_eq!(eff.top_performer_name, NOT_AVAILABLE);
    }

    #[test]
    fn efficiency_tie_goes_to_first_member() {
        let p = project(vec![member(1, "First"), member(2, "Second")], vec![]);
        let eff = team_efficiency(&p);

        assert_eq!(eff.score, 0.0);
        assert_eq!(eff.top_performer_name, "First");
    }

    #[test]
    fn unassigned_member_contributes_zero_rate() {
        let p = project(
            vec![member(1, "Busy"), member(2, "Idle")],
            vec![done(assigned(task(1), &[1]), at(2024, 1, 2))],
        );
        assert_eq!(team_efficiency(&p).score, 50.0);
    }

    #[test]
    fn dangling_assignees_are_ignored() {
        let p = project(vec![member(1, "A")], vec![assigned(task(1), &[99])]);

        let eff = team_efficiency(&p);
        let load = workload_distribution(&p);

        assert_eq!(eff.members[0].assigned, 0);
        assert_eq!(load.members[0].assigned, 0);
    }

    #[test]
    fn even_workload_scores_full_balance() {
        let p = project(
            vec![member(1, "A"), member(2, "B")],
            vec![assigned(task(1), &[1]), assigned(task(2), &[2])],
        );
        assert_eq!(workload_distribution(&p).balance_score, 100.0);
    }

    #[test]
    fn skewed_workload_lowers_balance() {
        // Counts 4 and 0, mean 2, max deviation 2, 4 tasks
        let p = project(
            vec![member(1, "A"), member(2, "B")],
            (1..=4).map(|i| assigned(task(i), &[1])).collect(),
        );
        assert_eq!(workload_distribution(&p).balance_score, 50.0);
    }

    #[test]
    fn workload_without_tasks() {
        let with_team = project(vec![member(1, "A")], vec![]);
        let without_team = project(vec![], vec![]);

        assert_eq!(workload_distribution(&with_team).balance_score, 100.0);
        assert_eq!(workload_distribution(&without_team).balance_score, 0.0);
    }

    #[test]
    fn most_active_counts_completed_assignments() {
        let p = project(
            vec![member(1, "A"), member(2, "B")],
            vec![
                assigned(task(1), &[1]),
                done(assigned(task(2), &[2]), at(2024, 1, 2)),
            ],
        );
        assert_eq!(most_active_member(&p).map(|m| m.name.as_str()), Some("B"));
    }

    #[test]
    fn most_active_of_empty_team_is_none() {
        assert!(most_active_member(&project(vec![], vec![])).is_none());
    }
}
