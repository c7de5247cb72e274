use async_graphql::SimpleObject;
use serde::Serialize;

use super::{average_by, group_by, round_to};
use crate::query::PayrollRow;

/// Salary bands as `(label, lower bound inclusive, upper bound exclusive)`.
pub const SALARY_BANDS: [(&str, i64, i64); 4] = [
    ("<$50K", 0, 50_000),
    ("$50-70K", 50_000, 70_000),
    ("$70-90K", 70_000, 90_000),
    (">$90K", 90_000, i64::MAX),
];

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub record_count: usize,
    pub total_gross: i64,
    pub total_net: i64,
    pub total_taxes: i64,
    pub total_deductions: i64,
    pub total_bonus: i64,
    pub average_gross: Option<f64>,
    /// Average benefits deduction per record, rounded to whole dollars.
    pub average_deductions: Option<i64>,
    /// Taxes over gross pay in percent, two decimals.
    pub effective_tax_rate: Option<f64>,
    pub departments: Vec<DepartmentPayroll>,
    pub salary_distribution: Vec<SalaryBucket>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayroll {
    pub department: String,
    pub headcount: usize,
    pub net_pay: i64,
    pub taxes: i64,
    pub deductions: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct SalaryBucket {
    pub label: String,
    pub count: usize,
}

/// Totals over joined payroll rows. Records whose employee is gone are
/// expected to be filtered out already.
pub fn payroll_summary(rows: &[PayrollRow]) -> PayrollSummary {
    let total = |f: fn(&PayrollRow) -> i64| rows.iter().map(f).sum::<i64>();
    let total_gross = total(|r| r.record.gross_pay());
    let total_taxes = total(|r| r.record.taxes);
    let total_deductions = total(|r| r.record.deductions);

    let departments = group_by(rows, |r| r.department.clone())
        .into_iter()
        .map(|(department, members)| DepartmentPayroll {
            headcount: members.len(),
            net_pay: members.iter().map(|r| r.record.net_pay()).sum(),
            taxes: members.iter().map(|r| r.record.taxes).sum(),
            deductions: members.iter().map(|r| r.record.deductions).sum(),
            department,
        })
        .collect();

    let salary_distribution = SALARY_BANDS
        .iter()
        .map(|(label, min, max)| SalaryBucket {
            label: (*label).to_string(),
            count: rows
                .iter()
                .filter(|r| (*min..*max).contains(&r.record.base_salary))
                .count(),
        })
        .collect();

    PayrollSummary {
        record_count: rows.len(),
        total_gross,
        total_net: total(|r| r.record.net_pay()),
        total_taxes,
        total_deductions,
        total_bonus: total(|r| r.record.bonus),
        average_gross: average_by(rows, |r| r.record.gross_pay() as f64),
        average_deductions: average_by(rows, |r| r.record.deductions as f64)
            .map(|avg| avg.round() as i64),
        effective_tax_rate: (total_gross > 0)
            .then(|| round_to(total_taxes as f64 / total_gross as f64 * 100.0, 2)),
        departments,
        salary_distribution,
    }
}
