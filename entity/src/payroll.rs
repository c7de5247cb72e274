use async_graphql::{ComplexObject, Enum, SimpleObject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::{Keyed, Label};

/// One pay-period line for an employee. Amounts are whole dollars.
///
/// Net pay is not stored: it is always derived from the other amounts so an
/// edit can never leave it stale. Serialized output carries `grossPay` and
/// `netPay` like the GraphQL object does; both are ignored on input.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: String,
    pub employee_id: String,
    pub month: String,
    pub year: i32,
    pub base_salary: i64,
    pub overtime: i64,
    pub bonus: i64,
    pub deductions: i64,
    pub taxes: i64,
    pub status: PayrollStatus,
    pub pay_date: Option<NaiveDate>,
}

impl PayrollRecord {
    pub fn gross_pay(&self) -> i64 {
        self.base_salary + self.overtime + self.bonus
    }

    pub fn net_pay(&self) -> i64 {
        self.gross_pay() - self.taxes - self.deductions
    }
}

impl Serialize for PayrollRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("PayrollRecord", 13)?;
        out.serialize_field("id", &self.id)?;
        out.serialize_field("employeeId", &self.employee_id)?;
        out.serialize_field("month", &self.month)?;
        out.serialize_field("year", &self.year)?;
        out.serialize_field("baseSalary", &self.base_salary)?;
        out.serialize_field("overtime", &self.overtime)?;
        out.serialize_field("bonus", &self.bonus)?;
        out.serialize_field("deductions", &self.deductions)?;
        out.serialize_field("taxes", &self.taxes)?;
        out.serialize_field("status", &self.status)?;
        out.serialize_field("payDate", &self.pay_date)?;
        out.serialize_field("grossPay", &self.gross_pay())?;
        out.serialize_field("netPay", &self.net_pay())?;
        out.end()
    }
}

#[ComplexObject]
impl PayrollRecord {
    #[graphql(name = "grossPay")]
    async fn resolve_gross_pay(&self) -> i64 {
        self.gross_pay()
    }

    #[graphql(name = "netPay")]
    async fn resolve_net_pay(&self) -> i64 {
        self.net_pay()
    }
}

impl Keyed for PayrollRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayrollStatus {
    Pending,
    Processed,
    Paid,
}

impl Default for PayrollStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Label for PayrollStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Processed, Self::Paid];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processed => "processed",
            Self::Paid => "paid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_pay_follows_the_amounts() {
        let mut record = PayrollRecord {
            id: "payroll-1".into(),
            employee_id: "1".into(),
            month: "January".into(),
            year: 2024,
            base_salary: 85_000,
            overtime: 1_200,
            bonus: 8_160,
            deductions: 7_549,
            taxes: 20_760,
            status: PayrollStatus::Processed,
            pay_date: None,
        };
        assert_eq!(record.gross_pay(), 94_360);
        assert_eq!(record.net_pay(), 66_051);

        record.bonus = 0;
        assert_eq!(record.net_pay(), 57_891);
    }

    #[test]
    fn json_carries_derived_pay() {
        let record = PayrollRecord {
            id: "payroll-2".into(),
            employee_id: "2".into(),
            month: "January".into(),
            year: 2024,
            base_salary: 72_000,
            overtime: 500,
            bonus: 1_500,
            deductions: 4_000,
            taxes: 16_000,
            status: PayrollStatus::Paid,
            pay_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["grossPay"], 74_000);
        assert_eq!(json["netPay"], 54_000);
        assert_eq!(json["status"], "paid");
        assert_eq!(json["payDate"], "2024-01-31");

        let back: PayrollRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
