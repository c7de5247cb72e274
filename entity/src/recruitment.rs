use async_graphql::{Enum, SimpleObject};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Keyed, Label, Priority};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: EmploymentType,
    /// Free-form range as advertised, e.g. `$60,000 - $80,000`.
    pub salary_range: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub status: PositionStatus,
    pub applicants: u32,
    pub posted: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
}

impl Keyed for Position {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Candidates point at a position by title, not by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub stage: CandidateStage,
    pub score: u32,
    pub applied_date: NaiveDate,
    pub resume: String,
    pub notes: String,
}

impl Keyed for Candidate {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub position: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: InterviewKind,
    pub interviewer: String,
    pub location: Option<String>,
    pub meeting_link: Option<String>,
    pub status: InterviewStatus,
    pub notes: Option<String>,
}

impl Keyed for Interview {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl Default for EmploymentType {
    fn default() -> Self {
        Self::FullTime
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionStatus {
    Open,
    Closed,
    OnHold,
}

impl Label for PositionStatus {
    const ALL: &'static [Self] = &[Self::Open, Self::Closed, Self::OnHold];

    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::OnHold => "on-hold",
        }
    }
}

/// Pipeline stages in board order.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateStage {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStage {
    /// Still moving through the pipeline.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Hired | Self::Rejected)
    }
}

impl Label for CandidateStage {
    const ALL: &'static [Self] = &[
        Self::Applied,
        Self::Screening,
        Self::Interview,
        Self::Offer,
        Self::Hired,
        Self::Rejected,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewKind {
    Phone,
    Video,
    InPerson,
}

impl Default for InterviewKind {
    fn default() -> Self {
        Self::Video
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}
