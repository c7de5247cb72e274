use async_graphql::{Enum, SimpleObject};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Keyed, Label};

/// A catalog course.
///
/// `enrolled` and `completed` are running counters. Historical totals in the
/// seed data have no matching [`Enrollment`] rows, so the counters cannot be
/// recomputed from the ledger; the store bumps them together with the
/// enrollment change that causes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub course_name: String,
    pub enrolled: u32,
    pub completed: u32,
    pub duration: String,
    pub category: String,
    pub instructor: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub status: CourseStatus,
    pub max_capacity: u32,
    pub location: String,
    pub delivery: Delivery,
    pub difficulty: Difficulty,
    pub price: i64,
    pub rating: f64,
    pub materials: Vec<String>,
    pub prerequisites: Vec<String>,
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: String,
    pub course_id: String,
    pub session_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: String,
    pub instructor: String,
    pub attendees: u32,
    pub max_attendees: u32,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
}

impl TrainingSession {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

impl Keyed for TrainingSession {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub employee_id: String,
    pub course_id: String,
    pub enrollment_date: NaiveDate,
    /// Percentage, 0 to 100.
    pub progress: u32,
    pub status: EnrollmentStatus,
    pub completion_date: Option<NaiveDate>,
    pub certificate_issued: bool,
    pub score: Option<u32>,
}

impl Keyed for Enrollment {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    Active,
    Upcoming,
    Completed,
    Cancelled,
}

impl Label for CourseStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Upcoming, Self::Completed, Self::Cancelled];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delivery {
    Online,
    InPerson,
    Hybrid,
}

impl Default for Delivery {
    fn default() -> Self {
        Self::Online
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrollmentStatus {
    Enrolled,
    InProgress,
    Completed,
    Dropped,
}
