use async_graphql::{Enum, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Keyed, Label};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    /// Annual salary in whole dollars.
    pub salary: i64,
    /// 0.0 to 5.0
    pub performance_rating: f64,
    /// Percentage, 0 to 100.
    pub attendance_rate: u32,
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,
}

impl Keyed for Employee {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Label for EmployeeStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}
