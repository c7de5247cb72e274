//! Recruitment pipeline and notification inbox counts.

use async_graphql::SimpleObject;
use entity::{
    Candidate, CandidateStage, Interview, InterviewStatus, Label, Notification, Position,
    PositionStatus, Priority,
};
use serde::Serialize;

use super::percent;

/// Inbox categories reported even when empty, in display order.
pub const NOTIFICATION_CATEGORIES: [&str; 7] = [
    "Performance",
    "Training",
    "Payroll",
    "Attendance",
    "HR",
    "System",
    "Recruitment",
];

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentSummary {
    pub open_positions: usize,
    pub total_candidates: usize,
    /// Candidates neither hired nor rejected.
    pub active_pipeline: usize,
    pub scheduled_interviews: usize,
    pub total_applicants: u32,
}

pub fn recruitment_summary(
    positions: &[Position],
    candidates: &[Candidate],
    interviews: &[Interview],
) -> RecruitmentSummary {
    RecruitmentSummary {
        open_positions: positions
            .iter()
            .filter(|p| p.status == PositionStatus::Open)
            .count(),
        total_candidates: candidates.len(),
        active_pipeline: candidates.iter().filter(|c| c.stage.is_active()).count(),
        scheduled_interviews: interviews
            .iter()
            .filter(|i| i.status == InterviewStatus::Scheduled)
            .count(),
        total_applicants: positions.iter().map(|p| p.applicants).sum(),
    }
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
pub struct PipelineColumn {
    pub stage: CandidateStage,
    pub candidates: Vec<Candidate>,
}

/// One column per stage in pipeline order, empty columns included.
pub fn kanban(candidates: &[Candidate]) -> Vec<PipelineColumn> {
    CandidateStage::ALL
        .iter()
        .map(|&stage| PipelineColumn {
            stage,
            candidates: candidates
                .iter()
                .filter(|c| c.stage == stage)
                .cloned()
                .collect(),
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub total: usize,
    pub unread: usize,
    /// Unread and waiting on an action.
    pub action_required: usize,
    /// Unread and high priority.
    pub high_priority: usize,
    pub categories: Vec<CategoryShare>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Percent of all notifications.
    pub share: Option<u32>,
}

pub fn notification_summary(notifications: &[Notification]) -> NotificationSummary {
    let unread: Vec<&Notification> = notifications.iter().filter(|n| !n.read).collect();

    let mut names: Vec<String> = NOTIFICATION_CATEGORIES.iter().map(|c| c.to_string()).collect();
    for notification in notifications {
        if !names.contains(&notification.category) {
            names.push(notification.category.clone());
        }
    }
    let total = notifications.len();
    let categories = names
        .into_iter()
        .map(|category| {
            let count = notifications
                .iter()
                .filter(|n| n.category == category)
                .count();
            CategoryShare {
                share: percent(count as f64, total as f64),
                count,
                category,
            }
        })
        .collect();

    NotificationSummary {
        total,
        unread: unread.len(),
        action_required: unread.iter().filter(|n| n.action_required).count(),
        high_priority: unread.iter().filter(|n| n.priority == Priority::High).count(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn pipeline_counts() {
        let summary = recruitment_summary(
            &fixtures::positions(),
            &fixtures::candidates(),
            &fixtures::interviews(),
        );
        assert_eq!(
            summary,
            RecruitmentSummary {
                open_positions: 3,
                total_candidates: 5,
                active_pipeline: 3,
                scheduled_interviews: 2,
                total_applicants: 74,
            }
        );
    }

    #[test]
    fn kanban_has_every_stage() {
        let columns = kanban(&fixtures::candidates());
        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0].stage, CandidateStage::Applied);
        assert_eq!(columns[0].candidates[0].name, "Mike Chen");
        assert!(columns[3].candidates.is_empty());
    }

    #[test]
    fn inbox_counts_only_unread_for_attention() {
        let summary = notification_summary(&fixtures::notifications());
        assert_eq!(summary.total, 6);
        assert_eq!(summary.unread, 4);
        assert_eq!(summary.action_required, 1);
        assert_eq!(summary.high_priority, 2);
        assert_eq!(summary.categories.len(), 7);
        assert_eq!(
            summary.categories[0],
            CategoryShare {
                category: "Performance".into(),
                count: 1,
                share: Some(17),
            }
        );
        assert_eq!(summary.categories[6].share, Some(0));
    }

    #[test]
    fn empty_inbox_has_no_shares() {
        let summary = notification_summary(&[]);
        assert_eq!(summary.categories[0].share, None);
    }
}
