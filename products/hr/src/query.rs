//! Search, categorical filters and column sorts for the list views.
//!
//! Every filter field is optional and an absent field matches everything. A
//! department of `all` (any case) or a blank search is treated as absent.
//! All predicates of a filter are ANDed.

use std::cmp::Ordering;

use async_graphql::{Enum, InputObject, SimpleObject};
use entity::{
    Candidate, CandidateStage, Course, CourseStatus, Employee, EmployeeStatus, Notification,
    PayrollRecord, PayrollStatus, Position, PositionStatus, Priority,
};
use serde::Serialize;

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Column plus direction of a sortable table header.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortState<C> {
    pub column: C,
    pub order: SortOrder,
}

impl<C: PartialEq> SortState<C> {
    /// Clicking the active column flips the order; any other column starts
    /// ascending.
    pub fn select(&mut self, column: C) {
        if self.column == column {
            self.order = self.order.flip();
        } else {
            self.column = column;
            self.order = SortOrder::Asc;
        }
    }
}

/// Comparable value of one sort column. Text compares lowercased.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

impl SortKey {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_lowercase())
    }
}

/// Stable sort, so equal keys keep store order.
pub fn sort_rows<T>(rows: &mut [T], order: SortOrder, key: impl Fn(&T) -> SortKey) {
    rows.sort_by(|a, b| order.apply(key(a).cmp(&key(b))));
}

/// Case-insensitive substring match against any of `fields`.
pub fn matches_search(term: Option<&str>, fields: &[&str]) -> bool {
    let Some(term) = term.filter(|t| !t.trim().is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact category match, with `all` and blank meaning no filter.
pub fn matches_category(filter: Option<&str>, value: &str) -> bool {
    match selected(filter) {
        Some(wanted) => wanted == value,
        None => true,
    }
}

fn selected(filter: Option<&str>) -> Option<&str> {
    filter.filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn matches<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.is_none_or(|wanted| wanted == value)
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct EmployeeFilter {
    /// Matches name, email or role.
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
}

pub fn filter_employees(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| {
            let fields = [e.name.as_str(), e.email.as_str(), e.role.as_str()];
            matches_search(filter.search.as_deref(), &fields)
                && matches_category(filter.department.as_deref(), &e.department)
                && matches(filter.status, e.status)
        })
        .cloned()
        .collect()
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct RosterFilter {
    pub search: Option<String>,
    pub department: Option<String>,
}

/// The attendance roster searches names only.
pub fn filter_roster(employees: &[Employee], filter: &RosterFilter) -> Vec<Employee> {
    employees
        .iter()
        .filter(|e| {
            matches_search(filter.search.as_deref(), &[e.name.as_str()])
                && matches_category(filter.department.as_deref(), &e.department)
        })
        .cloned()
        .collect()
}

/// A payroll record joined to its employee.
#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRow {
    pub record: PayrollRecord,
    pub employee_name: String,
    pub email: String,
    pub department: String,
}

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PayrollSortColumn {
    #[default]
    Name,
    Department,
    Salary,
    NetPay,
}

impl PayrollSortColumn {
    fn key(self, row: &PayrollRow) -> SortKey {
        match self {
            Self::Name => SortKey::text(&row.employee_name),
            Self::Department => SortKey::text(&row.department),
            Self::Salary => SortKey::Number(row.record.base_salary),
            Self::NetPay => SortKey::Number(row.record.net_pay()),
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct PayrollFilter {
    /// Matches employee name or email.
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<PayrollStatus>,
    #[graphql(default)]
    pub sort_by: PayrollSortColumn,
    #[graphql(default)]
    pub order: SortOrder,
    /// Header just selected, toggled against `sort_by` and `order`.
    pub clicked: Option<PayrollSortColumn>,
}

impl PayrollFilter {
    pub fn sort(&self) -> SortState<PayrollSortColumn> {
        let mut sort = SortState {
            column: self.sort_by,
            order: self.order,
        };
        if let Some(column) = self.clicked {
            sort.select(column);
        }
        sort
    }
}

/// Join every record to its employee. Records without one are skipped.
pub fn join_payroll(records: &[PayrollRecord], employees: &[Employee]) -> Vec<PayrollRow> {
    records
        .iter()
        .filter_map(|record| {
            let employee = employees.iter().find(|e| e.id == record.employee_id)?;
            Some(PayrollRow {
                record: record.clone(),
                employee_name: employee.name.clone(),
                email: employee.email.clone(),
                department: employee.department.clone(),
            })
        })
        .collect()
}

/// Joined, filtered and sorted payroll rows as the payroll table shows them.
pub fn payroll_rows(
    records: &[PayrollRecord],
    employees: &[Employee],
    filter: &PayrollFilter,
) -> Vec<PayrollRow> {
    let mut rows: Vec<PayrollRow> = join_payroll(records, employees)
        .into_iter()
        .filter(|row| {
            let fields = [row.employee_name.as_str(), row.email.as_str()];
            matches_search(filter.search.as_deref(), &fields)
                && matches_category(filter.department.as_deref(), &row.department)
                && matches(filter.status, row.record.status)
        })
        .collect();
    let sort = filter.sort();
    sort_rows(&mut rows, sort.order, |row| sort.column.key(row));
    rows
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct PositionFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<PositionStatus>,
}

pub fn filter_positions(positions: &[Position], filter: &PositionFilter) -> Vec<Position> {
    positions
        .iter()
        .filter(|p| {
            matches_search(filter.search.as_deref(), &[p.title.as_str()])
                && matches_category(filter.department.as_deref(), &p.department)
                && matches(filter.status, p.status)
        })
        .cloned()
        .collect()
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct CandidateFilter {
    pub search: Option<String>,
    /// Department of the position the candidate applied for.
    pub department: Option<String>,
    pub stage: Option<CandidateStage>,
}

pub fn filter_candidates(
    candidates: &[Candidate],
    positions: &[Position],
    filter: &CandidateFilter,
) -> Vec<Candidate> {
    let department = selected(filter.department.as_deref());
    candidates
        .iter()
        .filter(|c| {
            let in_department = department.is_none_or(|wanted| {
                positions
                    .iter()
                    .find(|p| p.title == c.position)
                    .is_some_and(|p| p.department == wanted)
            });
            matches_search(filter.search.as_deref(), &[c.name.as_str()])
                && in_department
                && matches(filter.stage, c.stage)
        })
        .cloned()
        .collect()
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<CourseStatus>,
}

pub fn filter_courses(courses: &[Course], filter: &CourseFilter) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| {
            matches_search(filter.search.as_deref(), &[c.course_name.as_str()])
                && matches_category(filter.category.as_deref(), &c.category)
                && matches(filter.status, c.status)
        })
        .cloned()
        .collect()
}

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
    ActionRequired,
}

impl ReadFilter {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "unread" => Some(Self::Unread),
            "read" => Some(Self::Read),
            "action-required" => Some(Self::ActionRequired),
            _ => None,
        }
    }

    fn matches(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Read => notification.read,
            Self::ActionRequired => notification.action_required,
        }
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct NotificationFilter {
    /// Matches title or message.
    pub search: Option<String>,
    #[graphql(default)]
    pub read: ReadFilter,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

pub fn filter_notifications(
    notifications: &[Notification],
    filter: &NotificationFilter,
) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|n| {
            matches_search(filter.search.as_deref(), &[n.title.as_str(), n.message.as_str()])
                && filter.read.matches(n)
                && matches_category(filter.category.as_deref(), &n.category)
                && matches(filter.priority, n.priority)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn names(employees: &[Employee]) -> Vec<&str> {
        employees.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let employees = fixtures::employees();
        let filter = EmployeeFilter {
            search: Some("DEVELOPER".into()),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_employees(&employees, &filter)),
            ["Sarah Johnson", "Robert Kim"]
        );

        let by_email = EmployeeFilter {
            search: Some("jennifer.lee@".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_employees(&employees, &by_email)), ["Jennifer Lee"]);
    }

    #[test]
    fn all_means_no_department_filter() {
        let employees = fixtures::employees();
        let filter = EmployeeFilter {
            department: Some("All".into()),
            ..Default::default()
        };
        assert_eq!(filter_employees(&employees, &filter).len(), 10);

        let sales = RosterFilter {
            department: Some("Sales".into()),
            search: Some("alex".into()),
        };
        assert_eq!(names(&filter_roster(&employees, &sales)), ["Alex Turner"]);
    }

    #[test]
    fn clicked_header_toggles_and_resets() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let again = PayrollFilter {
            clicked: Some(PayrollSortColumn::Name),
            ..Default::default()
        };
        assert_eq!(again.sort().order, SortOrder::Desc);
        let rows = payroll_rows(data.payroll.all(), data.employees.all(), &again);
        assert_eq!(rows[0].employee_name, "Sarah Johnson");
        assert_eq!(rows[9].employee_name, "Alex Turner");

        let other = PayrollFilter {
            order: SortOrder::Desc,
            clicked: Some(PayrollSortColumn::Salary),
            ..Default::default()
        };
        let sort = other.sort();
        assert_eq!(sort.column, PayrollSortColumn::Salary);
        assert_eq!(sort.order, SortOrder::Asc);
        let rows = payroll_rows(data.payroll.all(), data.employees.all(), &other);
        assert_eq!(rows[0].employee_name, "Jennifer Lee");
    }

    #[test]
    fn payroll_row_json_matches_the_graphql_shape() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let row = join_payroll(data.payroll.all(), data.employees.all()).remove(0);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["employeeName"], "Sarah Johnson");
        assert_eq!(json["record"]["baseSalary"], 85_000);
        assert_eq!(json["record"]["netPay"], row.record.net_pay());
        assert_eq!(json["record"]["grossPay"], row.record.gross_pay());
    }

    #[test]
    fn payroll_rows_sort_by_salary_descending() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let filter = PayrollFilter {
            sort_by: PayrollSortColumn::Salary,
            order: SortOrder::Desc,
            ..Default::default()
        };
        let rows = payroll_rows(data.payroll.all(), data.employees.all(), &filter);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].employee_name, "Sarah Johnson");
        assert_eq!(rows[9].record.base_salary, 55_000);
    }

    #[test]
    fn payroll_rows_default_to_name_order_and_skip_orphans() {
        let mut data = fixtures::seed(fixtures::DEFAULT_SEED);
        data.remove_employee("10").unwrap();
        let rows = payroll_rows(
            data.payroll.all(),
            data.employees.all(),
            &PayrollFilter::default(),
        );
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].employee_name, "David Wilson");
        assert_eq!(rows[8].employee_name, "Sarah Johnson");
    }

    #[test]
    fn candidates_filter_through_their_position() {
        let candidates = fixtures::candidates();
        let positions = fixtures::positions();
        let product = CandidateFilter {
            department: Some("Product".into()),
            ..Default::default()
        };
        let found = filter_candidates(&candidates, &positions, &product);
        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["2", "5"]);

        let hired = CandidateFilter {
            stage: Some(CandidateStage::Hired),
            ..product
        };
        assert_eq!(filter_candidates(&candidates, &positions, &hired).len(), 1);
    }

    #[test]
    fn notification_read_states() {
        let notifications = fixtures::notifications();
        let count = |read| {
            let filter = NotificationFilter {
                read,
                ..Default::default()
            };
            filter_notifications(&notifications, &filter).len()
        };
        assert_eq!(count(ReadFilter::All), 6);
        assert_eq!(count(ReadFilter::Unread), 4);
        assert_eq!(count(ReadFilter::Read), 2);
        assert_eq!(count(ReadFilter::ActionRequired), 2);
        assert_eq!(ReadFilter::from_label("Action-Required"), Some(ReadFilter::ActionRequired));
    }

    #[test]
    fn courses_by_category_and_status() {
        let data = fixtures::seed(fixtures::DEFAULT_SEED);
        let filter = CourseFilter {
            category: Some("Security".into()),
            status: Some(CourseStatus::Active),
            ..Default::default()
        };
        let found = filter_courses(data.courses.all(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].course_name, "Cybersecurity Awareness");
    }
}
