use async_graphql::SimpleObject;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Company-wide head counts for one day. There is no per-employee ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct PerformanceSample {
    /// Three-letter month label (`Jan`..`Dec`).
    pub month: String,
    pub department: String,
    pub score: u32,
}
