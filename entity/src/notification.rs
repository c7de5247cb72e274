use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Keyed, Label, Priority};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
    pub category: String,
    /// Employee ids; empty means everyone.
    pub recipients: Vec<String>,
    pub action_required: bool,
    pub related_id: Option<String>,
    pub related_type: Option<RelatedType>,
}

impl Keyed for Notification {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct NotificationTemplate {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subject: String,
    /// Body with `{placeholder}` slots.
    pub message: String,
    pub kind: NotificationKind,
    pub priority: Priority,
    pub triggers: Vec<String>,
}

impl Keyed for NotificationTemplate {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Success,
    Warning,
    Alert,
    Info,
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Info
    }
}

impl Label for NotificationKind {
    const ALL: &'static [Self] = &[Self::Success, Self::Warning, Self::Alert, Self::Info];

    fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Alert => "alert",
            Self::Info => "info",
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelatedType {
    Employee,
    Course,
    Payroll,
    Recruitment,
}
