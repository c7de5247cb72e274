//! Flat record types behind every dashboard view.
//!
//! Records reference each other by id only. Nothing here enforces that a
//! referenced id exists; joins happen in the views that need them.

pub mod attendance;
pub mod employee;
pub mod notification;
pub mod payroll;
pub mod recruitment;
pub mod settings;
pub mod training;

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

pub use attendance::{AttendanceDay, PerformanceSample};
pub use employee::{Employee, EmployeeStatus};
pub use notification::{Notification, NotificationKind, NotificationTemplate, RelatedType};
pub use payroll::{PayrollRecord, PayrollStatus};
pub use recruitment::{
    Candidate, CandidateStage, EmploymentType, Interview, InterviewKind, InterviewStatus,
    Position, PositionStatus,
};
pub use settings::{NotificationPreferences, Preferences, Profile, Settings};
pub use training::{
    Course, CourseStatus, Delivery, Difficulty, Enrollment, EnrollmentStatus, SessionStatus,
    TrainingSession,
};

/// Enum variants that round-trip through the lowercase labels used by
/// filters, query strings and exports.
pub trait Label: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_label(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(wanted))
    }
}

/// Any record addressable by a string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Label for Priority {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Priority::from_label(" HIGH "), Some(Priority::High));
        assert_eq!(PositionStatus::from_label("on-hold"), Some(PositionStatus::OnHold));
        assert_eq!(PayrollStatus::from_label("all"), None);
    }

    #[test]
    fn enums_serialize_in_kebab_case() {
        let json = serde_json::to_string(&InterviewKind::InPerson).unwrap();
        assert_eq!(json, "\"in-person\"");
        let parsed: EmploymentType = serde_json::from_str("\"full-time\"").unwrap();
        assert_eq!(parsed, EmploymentType::FullTime);
    }
}
