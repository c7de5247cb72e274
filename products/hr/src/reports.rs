//! Downloadable CSV and text reports.
//!
//! Bodies are built in memory and joined with `\n`, without a trailing
//! newline. Summary sections always cover every record; detail sections
//! follow the filters the caller passes in.

use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{Datelike, NaiveDate};
use entity::{CourseStatus, Label, PayrollStatus, Priority};
use serde::{Deserialize, Serialize};

use crate::{
    error::{HrError, HrResult},
    metrics::{self, format_score},
    query::{self, CourseFilter, NotificationFilter, PayrollFilter, PayrollRow, ReadFilter},
    store::Collections,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Payroll,
    Tax,
    Benefits,
    Training,
    Notifications,
    EmployeesExport,
    PerformanceExport,
    AttendanceExport,
    PayrollExport,
}

impl Label for ReportKind {
    const ALL: &'static [Self] = &[
        Self::Payroll,
        Self::Tax,
        Self::Benefits,
        Self::Training,
        Self::Notifications,
        Self::EmployeesExport,
        Self::PerformanceExport,
        Self::AttendanceExport,
        Self::PayrollExport,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Payroll => "payroll",
            Self::Tax => "tax",
            Self::Benefits => "benefits",
            Self::Training => "training",
            Self::Notifications => "notifications",
            Self::EmployeesExport => "employees-export",
            Self::PerformanceExport => "performance-export",
            Self::AttendanceExport => "attendance-export",
            Self::PayrollExport => "payroll-export",
        }
    }
}

impl ReportKind {
    pub fn parse(value: &str) -> HrResult<Self> {
        Self::from_label(value).ok_or_else(|| HrError::UnknownReport(value.to_string()))
    }

    /// File name without the date and extension.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Payroll => "payroll-report",
            Self::Tax => "tax-summary",
            Self::Benefits => "benefits-report",
            Self::Training => "training-report",
            Self::Notifications => "notifications-report",
            Self::EmployeesExport => "employees-export",
            Self::PerformanceExport => "performance-export",
            Self::AttendanceExport => "attendance-export",
            Self::PayrollExport => "payroll-export",
        }
    }

    pub fn is_csv(self) -> bool {
        matches!(
            self,
            Self::Payroll
                | Self::EmployeesExport
                | Self::PerformanceExport
                | Self::AttendanceExport
                | Self::PayrollExport
        )
    }

    pub fn extension(self) -> &'static str {
        if self.is_csv() { "csv" } else { "txt" }
    }

    pub fn content_type(self) -> &'static str {
        if self.is_csv() {
            "text/csv; charset=utf-8"
        } else {
            "text/plain; charset=utf-8"
        }
    }

    pub fn filename(self, day: NaiveDate) -> String {
        format!("{}-{}.{}", self.stem(), day.format("%Y-%m-%d"), self.extension())
    }
}

/// The data sets the settings page can export in one go.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDataset {
    Employees,
    Performance,
    Attendance,
    Payroll,
}

impl Label for ExportDataset {
    const ALL: &'static [Self] = &[
        Self::Employees,
        Self::Performance,
        Self::Attendance,
        Self::Payroll,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Performance => "performance",
            Self::Attendance => "attendance",
            Self::Payroll => "payroll",
        }
    }
}

impl ExportDataset {
    pub fn report(self) -> ReportKind {
        match self {
            Self::Employees => ReportKind::EmployeesExport,
            Self::Performance => ReportKind::PerformanceExport,
            Self::Attendance => ReportKind::AttendanceExport,
            Self::Payroll => ReportKind::PayrollExport,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: ReportKind,
    pub filename: String,
    pub content_type: String,
    pub body: String,
}

/// Loose, string-typed filters as they arrive from query strings. Which ones
/// apply depends on the report; the rest are ignored.
#[derive(InputObject, Clone, Debug, Default, Deserialize)]
pub struct ReportFilters {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub read: Option<String>,
}

impl ReportFilters {
    fn payroll(&self) -> HrResult<PayrollFilter> {
        Ok(PayrollFilter {
            search: self.search.clone(),
            department: self.department.clone(),
            status: parse_choice::<PayrollStatus>("status", self.status.as_deref())?,
            ..Default::default()
        })
    }

    fn courses(&self) -> HrResult<CourseFilter> {
        Ok(CourseFilter {
            search: self.search.clone(),
            category: self.category.clone(),
            status: parse_choice::<CourseStatus>("status", self.status.as_deref())?,
        })
    }

    fn notifications(&self) -> HrResult<NotificationFilter> {
        let read = match self.read.as_deref() {
            Some(value) => {
                ReadFilter::from_label(value).ok_or_else(|| HrError::invalid("read", value))?
            }
            None => ReadFilter::All,
        };
        Ok(NotificationFilter {
            search: self.search.clone(),
            read,
            category: self.category.clone(),
            priority: parse_choice::<Priority>("priority", self.priority.as_deref())?,
        })
    }
}

/// `None`, blank and `all` select everything.
fn parse_choice<T: Label>(field: &'static str, value: Option<&str>) -> HrResult<Option<T>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => T::from_label(v)
            .map(Some)
            .ok_or_else(|| HrError::invalid(field, v)),
    }
}

pub fn build_report(
    kind: ReportKind,
    data: &Collections,
    filters: &ReportFilters,
    today: NaiveDate,
) -> HrResult<Report> {
    let lines = match kind {
        ReportKind::Payroll => {
            let rows = filtered_payroll(data, filters)?;
            payroll_csv(&rows)
        }
        ReportKind::Tax => tax_summary(data, &filtered_payroll(data, filters)?, today),
        ReportKind::Benefits => benefits_report(data, &filtered_payroll(data, filters)?, today),
        ReportKind::Training => training_report(data, &filters.courses()?, today),
        ReportKind::Notifications => {
            notifications_report(data, &filters.notifications()?, today)
        }
        ReportKind::EmployeesExport => employees_csv(data),
        ReportKind::PerformanceExport => performance_csv(data),
        ReportKind::AttendanceExport => attendance_csv(data),
        ReportKind::PayrollExport => payroll_csv(&all_payroll(data)),
    };
    Ok(Report {
        kind,
        filename: kind.filename(today),
        content_type: kind.content_type().to_string(),
        body: lines.join("\n"),
    })
}

fn all_payroll(data: &Collections) -> Vec<PayrollRow> {
    query::join_payroll(data.payroll.all(), data.employees.all())
}

fn filtered_payroll(data: &Collections, filters: &ReportFilters) -> HrResult<Vec<PayrollRow>> {
    let rows = query::payroll_rows(data.payroll.all(), data.employees.all(), &filters.payroll()?);
    if rows.is_empty() {
        return Err(HrError::NoReportData);
    }
    Ok(rows)
}

pub const PAYROLL_HEADER: &str =
    "Employee Name,Department,Base Salary,Overtime,Bonus,Taxes,Deductions,Net Pay,Status";

fn payroll_csv(rows: &[PayrollRow]) -> Vec<String> {
    let mut lines = vec![PAYROLL_HEADER.to_string()];
    lines.extend(rows.iter().map(|row| {
        let r = &row.record;
        format!(
            "{},{},{},{},{},{},{},{},{}",
            quote(&row.employee_name),
            quote(&row.department),
            r.base_salary,
            r.overtime,
            r.bonus,
            r.taxes,
            r.deductions,
            r.net_pay(),
            quote(r.status.as_str()),
        )
    }));
    lines
}

fn tax_summary(data: &Collections, rows: &[PayrollRow], today: NaiveDate) -> Vec<String> {
    let summary = metrics::payroll_summary(&all_payroll(data));
    let tax_rate = summary
        .effective_tax_rate
        .map_or_else(|| "N/A".to_string(), |rate| format!("{rate:.2}%"));
    let mut lines = header("TAX SUMMARY REPORT", today);
    lines.extend([
        "SUMMARY:".to_string(),
        format!("Total Gross Pay: {}", dollars(summary.total_gross)),
        format!("Total Taxes Withheld: {}", dollars(summary.total_taxes)),
        format!("Tax Rate: {tax_rate}"),
        String::new(),
        "BY DEPARTMENT:".to_string(),
    ]);
    lines.extend(
        summary
            .departments
            .iter()
            .map(|d| format!("{}: {}", d.department, dollars(d.taxes))),
    );
    lines.extend([String::new(), "EMPLOYEE DETAILS:".to_string()]);
    lines.extend(
        rows.iter()
            .map(|row| format!("{}: {}", row.employee_name, dollars(row.record.taxes))),
    );
    lines
}

fn benefits_report(data: &Collections, rows: &[PayrollRow], today: NaiveDate) -> Vec<String> {
    let summary = metrics::payroll_summary(&all_payroll(data));
    let average = summary
        .average_deductions
        .map_or_else(|| "N/A".to_string(), dollars);
    let mut lines = header("BENEFITS REPORT", today);
    lines.extend([
        "SUMMARY:".to_string(),
        format!("Total Benefits Deductions: {}", dollars(summary.total_deductions)),
        format!("Average per Employee: {average}"),
        String::new(),
        "BY DEPARTMENT:".to_string(),
    ]);
    lines.extend(
        summary
            .departments
            .iter()
            .map(|d| format!("{}: {}", d.department, dollars(d.deductions))),
    );
    lines.extend([String::new(), "EMPLOYEE DETAILS:".to_string()]);
    lines.extend(
        rows.iter()
            .map(|row| format!("{}: {}", row.employee_name, dollars(row.record.deductions))),
    );
    lines
}

fn training_report(data: &Collections, filter: &CourseFilter, today: NaiveDate) -> Vec<String> {
    let summary = metrics::training_summary(
        data.courses.all(),
        data.enrollments.all(),
        data.employees.all(),
    );
    let rating = summary
        .average_rating
        .map_or_else(|| "N/A".to_string(), format_score);
    let mut lines = header("TRAINING REPORT", today);
    lines.extend([
        "SUMMARY:".to_string(),
        format!("Total Courses: {}", summary.total_courses),
        format!("Total Enrolled: {}", summary.total_enrolled),
        format!("Total Completed: {}", summary.total_completed),
        format!("Completion Rate: {}%", summary.completion_rate),
        format!("Average Rating: {rating}/5"),
        String::new(),
        "BY CATEGORY:".to_string(),
    ]);
    lines.extend(
        summary
            .categories
            .iter()
            .map(|c| format!("{}: {} courses, {} enrolled", c.category, c.courses, c.enrolled)),
    );
    lines.extend([String::new(), "COURSE DETAILS:".to_string()]);
    lines.extend(
        query::filter_courses(data.courses.all(), filter)
            .iter()
            .map(|c| {
                format!(
                    "{}: {} enrolled, {} completed ({}%)",
                    c.course_name,
                    c.enrolled,
                    c.completed,
                    metrics::training::completion_rate(c.completed, c.enrolled)
                )
            }),
    );
    lines
}

fn notifications_report(
    data: &Collections,
    filter: &NotificationFilter,
    today: NaiveDate,
) -> Vec<String> {
    let summary = metrics::notification_summary(data.notifications.all());
    let mut lines = header("NOTIFICATIONS REPORT", today);
    lines.extend([
        "SUMMARY:".to_string(),
        format!("Total Notifications: {}", summary.total),
        format!("Unread: {}", summary.unread),
        format!("Action Required: {}", summary.action_required),
        format!("High Priority: {}", summary.high_priority),
        String::new(),
        "BY CATEGORY:".to_string(),
    ]);
    lines.extend(
        summary
            .categories
            .iter()
            .map(|c| format!("{}: {} notifications", c.category, c.count)),
    );
    lines.extend([String::new(), "NOTIFICATION DETAILS:".to_string()]);
    lines.extend(
        query::filter_notifications(data.notifications.all(), filter)
            .iter()
            .map(|n| {
                format!(
                    "[{}] {}: {} ({})",
                    n.priority.as_str().to_uppercase(),
                    n.title,
                    n.message,
                    short_date(n.timestamp.date_naive())
                )
            }),
    );
    lines
}

fn employees_csv(data: &Collections) -> Vec<String> {
    let mut lines = vec!["Name,Department,Role,Email,Status".to_string()];
    lines.extend(data.employees.all().iter().map(|e| {
        format!(
            "{},{},{},{},{}",
            quote(&e.name),
            quote(&e.department),
            quote(&e.role),
            quote(&e.email),
            quote(e.status.as_str())
        )
    }));
    lines
}

fn performance_csv(data: &Collections) -> Vec<String> {
    let mut lines = vec!["Month,Department,Score".to_string()];
    lines.extend(
        data.performance
            .iter()
            .map(|s| format!("{},{},{}", quote(&s.month), quote(&s.department), s.score)),
    );
    lines
}

fn attendance_csv(data: &Collections) -> Vec<String> {
    let mut lines = vec!["Date,Present,Absent,Late".to_string()];
    lines.extend(data.attendance.iter().map(|d| {
        format!(
            "{},{},{},{}",
            d.date.format("%Y-%m-%d"),
            d.present,
            d.absent,
            d.late
        )
    }));
    lines
}

fn header(title: &str, today: NaiveDate) -> Vec<String> {
    vec![
        title.to_string(),
        format!("Generated: {}", short_date(today)),
        String::new(),
    ]
}

/// Always quoted; embedded quotes are doubled.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// `$85,000`, `-$1,200`.
pub fn dollars(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

/// `M/D/YYYY`, no padding.
pub fn short_date(day: NaiveDate) -> String {
    format!("{}/{}/{}", day.month(), day.day(), day.year())
}
