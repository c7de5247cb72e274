use async_graphql::SimpleObject;
use chrono::NaiveDate;
use entity::{AttendanceDay, Employee, EmployeeStatus, PerformanceSample};
use serde::Serialize;

use super::{average_by, group_by, percent, sum_by};

pub const TOP_PERFORMERS: usize = 5;
pub const RECENT_HIRES: usize = 4;
pub const UPCOMING_REVIEWS: usize = 4;
/// Ratings below this are due for a review.
pub const REVIEW_THRESHOLD: f64 = 4.5;
/// Ratings below this need improvement.
pub const IMPROVEMENT_THRESHOLD: f64 = 4.0;
const TREND_DAYS: usize = 7;
const MONTH_ORDER: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceOverview {
    pub total_employees: usize,
    pub active_employees: usize,
    pub average_performance: Option<f64>,
    pub average_attendance: Option<f64>,
    pub total_payroll: i64,
    pub departments: Vec<DepartmentBreakdown>,
    pub top_performers: Vec<Employee>,
    pub recent_hires: Vec<Employee>,
    pub upcoming_reviews: Vec<Employee>,
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBreakdown {
    pub department: String,
    pub count: usize,
    pub average_performance: f64,
    pub average_salary: f64,
}

pub fn workforce_overview(employees: &[Employee]) -> WorkforceOverview {
    let departments = group_by(employees, |e| e.department.clone())
        .into_iter()
        .map(|(department, members)| DepartmentBreakdown {
            count: members.len(),
            average_performance: average_by(&members, |e| e.performance_rating).unwrap_or(0.0),
            average_salary: average_by(&members, |e| e.salary as f64).unwrap_or(0.0),
            department,
        })
        .collect();

    let mut by_join_date = employees.to_vec();
    by_join_date.sort_by(|a, b| b.join_date.cmp(&a.join_date));
    by_join_date.truncate(RECENT_HIRES);

    WorkforceOverview {
        total_employees: employees.len(),
        active_employees: employees
            .iter()
            .filter(|e| e.status == EmployeeStatus::Active)
            .count(),
        average_performance: average_by(employees, |e| e.performance_rating),
        average_attendance: average_by(employees, |e| f64::from(e.attendance_rate)),
        total_payroll: employees.iter().map(|e| e.salary).sum(),
        departments,
        top_performers: top_performers(employees, TOP_PERFORMERS),
        recent_hires: by_join_date,
        upcoming_reviews: employees
            .iter()
            .filter(|e| e.performance_rating < REVIEW_THRESHOLD)
            .take(UPCOMING_REVIEWS)
            .cloned()
            .collect(),
    }
}

/// Highest rated first; ties keep store order.
pub fn top_performers(employees: &[Employee], limit: usize) -> Vec<Employee> {
    let mut ranked = employees.to_vec();
    ranked.sort_by(|a, b| b.performance_rating.total_cmp(&a.performance_rating));
    ranked.truncate(limit);
    ranked
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub monthly_trend: Vec<MonthlyScore>,
    pub department_ratings: Vec<DepartmentRating>,
    pub top_performers: Vec<Employee>,
    pub needs_improvement: Vec<Employee>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct MonthlyScore {
    pub month: String,
    pub score: u32,
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
pub struct DepartmentRating {
    pub department: String,
    pub average: f64,
    pub count: usize,
}

/// Trend is limited to `department` when given; the rest always covers
/// every employee.
pub fn performance_summary(
    employees: &[Employee],
    samples: &[PerformanceSample],
    department: Option<&str>,
) -> PerformanceSummary {
    let scoped: Vec<&PerformanceSample> = samples
        .iter()
        .filter(|s| department.is_none_or(|d| s.department == d))
        .collect();
    let mut monthly_trend: Vec<MonthlyScore> = group_by(&scoped, |s| s.month.clone())
        .into_iter()
        .map(|(month, members)| MonthlyScore {
            score: average_by(&members, |s| f64::from(s.score))
                .map(|avg| avg.round() as u32)
                .unwrap_or(0),
            month,
        })
        .collect();
    monthly_trend.sort_by_key(|m| month_rank(&m.month));

    let department_ratings = group_by(employees, |e| e.department.clone())
        .into_iter()
        .map(|(department, members)| DepartmentRating {
            average: average_by(&members, |e| e.performance_rating).unwrap_or(0.0),
            count: members.len(),
            department,
        })
        .collect();

    let mut needs_improvement: Vec<Employee> = employees
        .iter()
        .filter(|e| e.performance_rating < IMPROVEMENT_THRESHOLD)
        .cloned()
        .collect();
    needs_improvement.sort_by(|a, b| a.performance_rating.total_cmp(&b.performance_rating));

    PerformanceSummary {
        monthly_trend,
        department_ratings,
        top_performers: top_performers(employees, TOP_PERFORMERS),
        needs_improvement,
    }
}

fn month_rank(month: &str) -> usize {
    MONTH_ORDER
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))
        .unwrap_or(MONTH_ORDER.len())
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_present: u64,
    pub total_absent: u64,
    pub total_late: u64,
    pub total_days: usize,
    /// Present over present plus absent, in percent.
    pub average_attendance: Option<u32>,
    pub daily: Vec<DailyAttendance>,
    pub latest: Option<AttendanceDay>,
    pub departments: Vec<DepartmentAttendance>,
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    pub weekday: String,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub rate: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct DepartmentAttendance {
    pub department: String,
    pub employees: usize,
    /// Mean attendance rate of the department's employees.
    pub rate: u32,
    /// Head count implied by `rate`, not a measured value.
    pub present: usize,
    pub absent: usize,
}

pub fn attendance_summary(days: &[AttendanceDay], employees: &[Employee]) -> AttendanceSummary {
    let total_present = sum_by(days, |d| f64::from(d.present)) as u64;
    let total_absent = sum_by(days, |d| f64::from(d.absent)) as u64;
    let total_late = sum_by(days, |d| f64::from(d.late)) as u64;

    let daily = days[days.len().saturating_sub(TREND_DAYS)..]
        .iter()
        .map(|d| DailyAttendance {
            date: d.date,
            weekday: d.date.format("%a").to_string(),
            present: d.present,
            absent: d.absent,
            late: d.late,
            rate: percent(f64::from(d.present), f64::from(d.present + d.absent)),
        })
        .collect();

    let departments = group_by(employees, |e| e.department.clone())
        .into_iter()
        .map(|(department, members)| {
            let rate = average_by(&members, |e| f64::from(e.attendance_rate))
                .map(|avg| avg.round() as u32)
                .unwrap_or(0);
            let headcount = members.len();
            let present = (f64::from(rate) / 100.0 * headcount as f64).round() as usize;
            DepartmentAttendance {
                department,
                employees: headcount,
                rate,
                present,
                absent: headcount.saturating_sub(present),
            }
        })
        .collect();

    AttendanceSummary {
        total_present,
        total_absent,
        total_late,
        total_days: days.len(),
        average_attendance: percent(total_present as f64, (total_present + total_absent) as f64),
        daily,
        latest: days.last().cloned(),
        departments,
    }
}
