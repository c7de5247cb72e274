//! String-typed form inputs and their conversion into records.
//!
//! Every field arrives as text, as typed. Numbers are read with a lenient
//! prefix parser, so `"85000 USD"` is `85000` and `"abc"` is nothing. On the
//! employee and payroll forms a blank, unreadable or zero number falls back to
//! a default for new records and to the current value for edits. Required
//! fields are presence checks only.

use async_graphql::InputObject;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use entity::{
    Candidate, Course, CourseStatus, Delivery, Difficulty, Employee, EmployeeStatus,
    EmploymentType, Enrollment, EnrollmentStatus, Interview, InterviewKind, InterviewStatus,
    Notification, NotificationKind, NotificationTemplate, PayrollRecord, PayrollStatus, Position,
    PositionStatus, Priority, SessionStatus, TrainingSession,
};

use crate::error::{HrError, HrResult};

pub const DEFAULT_SALARY: i64 = 50_000;
pub const DEFAULT_RATING: f64 = 3.0;
pub const DEFAULT_ATTENDANCE: u32 = 90;
pub const DEFAULT_COURSE_CAPACITY: u32 = 30;
pub const DEFAULT_SESSION_SEATS: u32 = 20;
pub const MIN_PASSWORD_LEN: usize = 8;
/// Largest salary or payroll amount a form accepts, in either sign.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Leading integer of `value`: optional whitespace, optional sign, digits.
pub fn parse_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, rest) = split_sign(s);
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading decimal of `value`, with optional fraction and exponent.
pub fn parse_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        mantissa_digits += cursor - fraction_start;
        if mantissa_digits > 0 {
            end = cursor;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exponent_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }
    s[..end].parse().ok()
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn parse_count(value: &str) -> Option<u32> {
    parse_int(value).and_then(|v| u32::try_from(v).ok())
}

/// Dollar amount with `fallback` for blank, unreadable or zero input. Amounts
/// past [`MAX_AMOUNT`] are rejected so derived totals cannot overflow.
fn amount_or(field: &'static str, value: &str, fallback: i64) -> HrResult<i64> {
    match parse_int(value).filter(|v| *v != 0) {
        Some(v) if v.abs() > MAX_AMOUNT => Err(HrError::invalid(field, value)),
        Some(v) => Ok(v),
        None => Ok(fallback),
    }
}

fn rating_or(value: &str, fallback: f64) -> f64 {
    parse_float(value).filter(|v| *v != 0.0).unwrap_or(fallback)
}

fn rate_or(value: &str, fallback: u32) -> u32 {
    parse_count(value).filter(|v| *v != 0).unwrap_or(fallback)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fails with every missing field named, in form order.
pub fn require<S: AsRef<str>>(fields: &[(&'static str, S)]) -> HrResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| blank(value.as_ref()))
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(HrError::MissingFields { fields: missing })
    }
}

/// `YYYY-MM-DD`.
pub fn parse_date(field: &'static str, value: &str) -> HrResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| HrError::invalid(field, value))
}

/// `HH:MM`, seconds optional.
pub fn parse_time(field: &'static str, value: &str) -> HrResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| HrError::invalid(field, value))
}

fn optional_date(field: &'static str, value: &str) -> HrResult<Option<NaiveDate>> {
    if blank(value) {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// One entry per non-blank line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn split_commas(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct EmployeeForm {
    #[graphql(default)]
    pub name: String,
    #[graphql(default)]
    pub email: String,
    #[graphql(default)]
    pub department: String,
    #[graphql(default)]
    pub role: String,
    #[graphql(default)]
    pub salary: String,
    #[graphql(default)]
    pub performance_rating: String,
    #[graphql(default)]
    pub attendance_rate: String,
    #[graphql(default)]
    pub join_date: String,
    #[graphql(default)]
    pub status: EmployeeStatus,
}

impl EmployeeForm {
    fn validate(&self) -> HrResult<()> {
        require(&[
            ("name", &self.name),
            ("email", &self.email),
            ("department", &self.department),
            ("role", &self.role),
        ])
    }

    pub fn create(&self, id: String, today: NaiveDate) -> HrResult<Employee> {
        self.validate()?;
        Ok(Employee {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
            role: self.role.trim().to_string(),
            salary: amount_or("salary", &self.salary, DEFAULT_SALARY)?,
            performance_rating: rating_or(&self.performance_rating, DEFAULT_RATING),
            attendance_rate: rate_or(&self.attendance_rate, DEFAULT_ATTENDANCE),
            join_date: optional_date("joinDate", &self.join_date)?.unwrap_or(today),
            status: self.status,
        })
    }

    pub fn apply(&self, current: &Employee) -> HrResult<Employee> {
        self.validate()?;
        Ok(Employee {
            id: current.id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
            role: self.role.trim().to_string(),
            salary: amount_or("salary", &self.salary, current.salary)?,
            performance_rating: rating_or(&self.performance_rating, current.performance_rating),
            attendance_rate: rate_or(&self.attendance_rate, current.attendance_rate),
            join_date: optional_date("joinDate", &self.join_date)?.unwrap_or(current.join_date),
            status: self.status,
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct PayrollEditForm {
    #[graphql(default)]
    pub base_salary: String,
    #[graphql(default)]
    pub overtime: String,
    #[graphql(default)]
    pub bonus: String,
    #[graphql(default)]
    pub deductions: String,
    #[graphql(default)]
    pub taxes: String,
    pub status: Option<PayrollStatus>,
    #[graphql(default)]
    pub pay_date: String,
}

impl PayrollEditForm {
    /// Every amount left blank or zero keeps the record's value.
    pub fn apply(&self, current: &PayrollRecord) -> HrResult<PayrollRecord> {
        Ok(PayrollRecord {
            base_salary: amount_or("baseSalary", &self.base_salary, current.base_salary)?,
            overtime: amount_or("overtime", &self.overtime, current.overtime)?,
            bonus: amount_or("bonus", &self.bonus, current.bonus)?,
            deductions: amount_or("deductions", &self.deductions, current.deductions)?,
            taxes: amount_or("taxes", &self.taxes, current.taxes)?,
            status: self.status.unwrap_or(current.status),
            pay_date: optional_date("payDate", &self.pay_date)?.or(current.pay_date),
            ..current.clone()
        })
    }

    /// Net pay as typed so far, blanks counted as zero.
    pub fn preview_net_pay(&self) -> i64 {
        let amount = |value: &str| parse_int(value).unwrap_or(0);
        amount(&self.base_salary)
            .saturating_add(amount(&self.overtime))
            .saturating_add(amount(&self.bonus))
            .saturating_sub(amount(&self.taxes))
            .saturating_sub(amount(&self.deductions))
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct PositionForm {
    #[graphql(default)]
    pub title: String,
    #[graphql(default)]
    pub department: String,
    #[graphql(default)]
    pub location: String,
    #[graphql(default)]
    pub employment_type: EmploymentType,
    #[graphql(default)]
    pub salary_range: String,
    #[graphql(default)]
    pub description: String,
    /// One requirement per line.
    #[graphql(default)]
    pub requirements: String,
    #[graphql(default)]
    pub deadline: String,
    #[graphql(default)]
    pub priority: Priority,
}

impl PositionForm {
    pub fn create(&self, id: String, today: NaiveDate) -> HrResult<Position> {
        require(&[("title", &self.title), ("department", &self.department)])?;
        Ok(Position {
            id,
            title: self.title.trim().to_string(),
            department: self.department.trim().to_string(),
            location: self.location.trim().to_string(),
            employment_type: self.employment_type,
            salary_range: self.salary_range.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: split_lines(&self.requirements),
            status: PositionStatus::Open,
            applicants: 0,
            posted: today,
            deadline: optional_date("deadline", &self.deadline)?,
            priority: self.priority,
        })
    }

    /// Keeps the posting's status, applicant count and posting date.
    pub fn apply(&self, current: &Position) -> HrResult<Position> {
        let fresh = self.create(current.id.clone(), current.posted)?;
        Ok(Position {
            status: current.status,
            applicants: current.applicants,
            ..fresh
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct InterviewForm {
    #[graphql(default)]
    pub candidate_id: String,
    #[graphql(default)]
    pub date: String,
    #[graphql(default)]
    pub time: String,
    #[graphql(default)]
    pub kind: InterviewKind,
    #[graphql(default)]
    pub interviewer: String,
    #[graphql(default)]
    pub location: String,
    #[graphql(default)]
    pub meeting_link: String,
    #[graphql(default)]
    pub notes: String,
}

impl InterviewForm {
    pub fn build(&self, id: String, candidate: &Candidate) -> HrResult<Interview> {
        require(&[
            ("date", &self.date),
            ("time", &self.time),
            ("interviewer", &self.interviewer),
        ])?;
        Ok(Interview {
            id,
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            position: candidate.position.clone(),
            date: parse_date("date", &self.date)?,
            time: parse_time("time", &self.time)?,
            kind: self.kind,
            interviewer: self.interviewer.trim().to_string(),
            location: optional_text(&self.location),
            meeting_link: optional_text(&self.meeting_link),
            status: InterviewStatus::Scheduled,
            notes: optional_text(&self.notes),
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct CourseForm {
    #[graphql(default)]
    pub course_name: String,
    #[graphql(default)]
    pub category: String,
    #[graphql(default)]
    pub instructor: String,
    #[graphql(default)]
    pub start_date: String,
    #[graphql(default)]
    pub end_date: String,
    #[graphql(default)]
    pub duration: String,
    #[graphql(default)]
    pub max_capacity: String,
    #[graphql(default)]
    pub location: String,
    #[graphql(default)]
    pub delivery: Delivery,
    #[graphql(default)]
    pub difficulty: Difficulty,
    #[graphql(default)]
    pub price: String,
    #[graphql(default)]
    pub description: String,
    #[graphql(default)]
    pub materials: String,
    #[graphql(default)]
    pub prerequisites: String,
}

impl CourseForm {
    fn build(&self, id: String, capacity: u32, price: i64) -> HrResult<Course> {
        require(&[("courseName", &self.course_name), ("category", &self.category)])?;
        Ok(Course {
            id,
            course_name: self.course_name.trim().to_string(),
            enrolled: 0,
            completed: 0,
            duration: self.duration.trim().to_string(),
            category: self.category.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            start_date: optional_date("startDate", &self.start_date)?,
            end_date: optional_date("endDate", &self.end_date)?,
            description: self.description.trim().to_string(),
            status: CourseStatus::Upcoming,
            max_capacity: parse_count(&self.max_capacity).unwrap_or(capacity),
            location: self.location.trim().to_string(),
            delivery: self.delivery,
            difficulty: self.difficulty,
            price: parse_int(&self.price).unwrap_or(price),
            rating: 0.0,
            materials: split_lines(&self.materials),
            prerequisites: split_lines(&self.prerequisites),
        })
    }

    /// New courses start upcoming, unrated and with nobody enrolled.
    pub fn create(&self, id: String) -> HrResult<Course> {
        self.build(id, DEFAULT_COURSE_CAPACITY, 0)
    }

    /// Keeps status, rating and the enrollment counters.
    pub fn apply(&self, current: &Course) -> HrResult<Course> {
        let fresh = self.build(current.id.clone(), current.max_capacity, current.price)?;
        Ok(Course {
            enrolled: current.enrolled,
            completed: current.completed,
            status: current.status,
            rating: current.rating,
            ..fresh
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct SessionForm {
    #[graphql(default)]
    pub course_id: String,
    #[graphql(default)]
    pub session_name: String,
    #[graphql(default)]
    pub date: String,
    #[graphql(default)]
    pub time: String,
    #[graphql(default)]
    pub duration: String,
    #[graphql(default)]
    pub instructor: String,
    #[graphql(default)]
    pub max_attendees: String,
    #[graphql(default)]
    pub meeting_link: String,
    #[graphql(default)]
    pub location: String,
}

impl SessionForm {
    pub fn build(&self, id: String) -> HrResult<TrainingSession> {
        require(&[("sessionName", &self.session_name), ("date", &self.date)])?;
        let time = if blank(&self.time) {
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
        } else {
            parse_time("time", &self.time)?
        };
        Ok(TrainingSession {
            id,
            course_id: self.course_id.trim().to_string(),
            session_name: self.session_name.trim().to_string(),
            date: parse_date("date", &self.date)?,
            time,
            duration: self.duration.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            attendees: 0,
            max_attendees: parse_count(&self.max_attendees).unwrap_or(DEFAULT_SESSION_SEATS),
            status: SessionStatus::Scheduled,
            meeting_link: optional_text(&self.meeting_link),
            location: optional_text(&self.location),
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct EnrollmentForm {
    #[graphql(default)]
    pub employee_id: String,
    #[graphql(default)]
    pub course_id: String,
}

impl EnrollmentForm {
    pub fn build(&self, id: String, today: NaiveDate) -> HrResult<Enrollment> {
        require(&[("employeeId", &self.employee_id), ("courseId", &self.course_id)])?;
        Ok(Enrollment {
            id,
            employee_id: self.employee_id.trim().to_string(),
            course_id: self.course_id.trim().to_string(),
            enrollment_date: today,
            progress: 0,
            status: EnrollmentStatus::Enrolled,
            completion_date: None,
            certificate_issued: false,
            score: None,
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct NotificationForm {
    #[graphql(default)]
    pub kind: NotificationKind,
    #[graphql(default)]
    pub title: String,
    #[graphql(default)]
    pub message: String,
    #[graphql(default)]
    pub priority: Priority,
    #[graphql(default)]
    pub category: String,
    #[graphql(default)]
    pub recipients: Vec<String>,
    #[graphql(default)]
    pub action_required: bool,
    #[graphql(default)]
    pub schedule_date: String,
    #[graphql(default)]
    pub schedule_time: String,
}

impl NotificationForm {
    /// A scheduled date and time, both given, become the timestamp (UTC).
    pub fn build(&self, id: String, now: DateTime<Utc>) -> HrResult<Notification> {
        require(&[("title", &self.title), ("message", &self.message)])?;
        let timestamp = if blank(&self.schedule_date) || blank(&self.schedule_time) {
            now
        } else {
            let date = parse_date("scheduleDate", &self.schedule_date)?;
            let time = parse_time("scheduleTime", &self.schedule_time)?;
            date.and_time(time).and_utc()
        };
        Ok(Notification {
            id,
            kind: self.kind,
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            timestamp,
            read: false,
            priority: self.priority,
            category: self.category.trim().to_string(),
            recipients: self.recipients.clone(),
            action_required: self.action_required,
            related_id: None,
            related_type: None,
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct TemplateForm {
    #[graphql(default)]
    pub name: String,
    #[graphql(default)]
    pub category: String,
    #[graphql(default)]
    pub subject: String,
    #[graphql(default)]
    pub message: String,
    #[graphql(default)]
    pub kind: NotificationKind,
    #[graphql(default)]
    pub priority: Priority,
    /// Comma separated.
    #[graphql(default)]
    pub triggers: String,
}

impl TemplateForm {
    pub fn build(&self, id: String) -> HrResult<NotificationTemplate> {
        require(&[("name", &self.name), ("subject", &self.subject)])?;
        Ok(NotificationTemplate {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.clone(),
            kind: self.kind,
            priority: self.priority,
            triggers: split_commas(&self.triggers),
        })
    }
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct PasswordForm {
    #[graphql(default)]
    pub current_password: String,
    #[graphql(default)]
    pub new_password: String,
    #[graphql(default)]
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> HrResult<()> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(HrError::PasswordFieldsMissing);
        }
        if self.new_password != self.confirm_password {
            return Err(HrError::PasswordMismatch);
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(HrError::PasswordTooShort);
        }
        Ok(())
    }
}
