//! The single in-memory source of truth shared by every dashboard view.
//!
//! Each record kind lives in a [`Table`]: insertion-ordered rows plus an id
//! index. [`Collections`] owns all tables and carries the mutations, including
//! the ones that touch more than one table. [`HrStore`] puts the collections
//! behind one async read/write lock, so a cascading mutation runs under a
//! single write guard and readers never see it half applied.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use entity::{
    AttendanceDay, Candidate, CandidateStage, Course, Employee, Enrollment, EnrollmentStatus,
    Interview, Keyed, Notification, NotificationTemplate, PayrollRecord, PerformanceSample,
    Position, SessionStatus, Settings, TrainingSession,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{HrError, HrResult};

#[derive(Clone, Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let mut table = Self::default();
        for row in rows {
            table.upsert(row);
        }
        table
    }

    pub fn all(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    /// Callers must not change the row's id through this reference.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&pos) => self.rows.get_mut(pos),
            None => None,
        }
    }

    /// Replace the row with the same id in place, or append. Returns `true`
    /// when the row is new.
    pub fn upsert(&mut self, row: T) -> bool {
        match self.index.get(row.key()) {
            Some(&pos) => {
                self.rows[pos] = row;
                false
            }
            None => {
                self.index.insert(row.key().to_string(), self.rows.len());
                self.rows.push(row);
                true
            }
        }
    }

    /// Insert at the front; an existing row with the same id is dropped first.
    pub fn prepend(&mut self, row: T) {
        self.remove(row.key());
        self.rows.insert(0, row);
        self.reindex();
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.index.remove(id)?;
        let row = self.rows.remove(pos);
        self.reindex();
        Some(row)
    }

    /// Remove every row whose id is listed. Returns how many went.
    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !ids.iter().any(|id| id == row.key()));
        let removed = before - self.rows.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.iter_mut()
    }

    fn reindex(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.key().to_string(), pos))
            .collect();
    }
}

/// Every table the dashboard reads from.
#[derive(Clone, Debug)]
pub struct Collections {
    pub employees: Table<Employee>,
    pub attendance: Vec<AttendanceDay>,
    pub performance: Vec<PerformanceSample>,
    pub payroll: Table<PayrollRecord>,
    pub positions: Table<Position>,
    pub candidates: Table<Candidate>,
    pub interviews: Table<Interview>,
    pub courses: Table<Course>,
    pub sessions: Table<TrainingSession>,
    pub enrollments: Table<Enrollment>,
    pub notifications: Table<Notification>,
    pub templates: Table<NotificationTemplate>,
    pub settings: Settings,
}

impl Collections {
    /// No records at all, only the given account settings.
    pub fn empty(settings: Settings) -> Self {
        Self {
            employees: Table::default(),
            attendance: Vec::new(),
            performance: Vec::new(),
            payroll: Table::default(),
            positions: Table::default(),
            candidates: Table::default(),
            interviews: Table::default(),
            courses: Table::default(),
            sessions: Table::default(),
            enrollments: Table::default(),
            notifications: Table::default(),
            templates: Table::default(),
            settings,
        }
    }

    pub fn employee(&self, id: &str) -> HrResult<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| HrError::not_found("employee", id))
    }

    /// Distinct employee departments in first-seen order.
    pub fn departments(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for employee in self.employees.all() {
            if !seen.contains(&employee.department) {
                seen.push(employee.department.clone());
            }
        }
        seen
    }

    pub fn replace_employee(&mut self, employee: Employee) -> HrResult<()> {
        if !self.employees.contains(&employee.id) {
            return Err(HrError::not_found("employee", employee.id));
        }
        self.employees.upsert(employee);
        Ok(())
    }

    /// Remove the employee only. Rows that reference the id stay and drop out
    /// of joined views on their own.
    pub fn remove_employee(&mut self, id: &str) -> HrResult<Employee> {
        self.employees
            .remove(id)
            .ok_or_else(|| HrError::not_found("employee", id))
    }

    pub fn replace_payroll(&mut self, record: PayrollRecord) -> HrResult<()> {
        if !self.payroll.contains(&record.id) {
            return Err(HrError::not_found("payroll record", record.id));
        }
        self.payroll.upsert(record);
        Ok(())
    }

    pub fn set_candidate_stage(&mut self, id: &str, stage: CandidateStage) -> HrResult<Candidate> {
        let candidate = self
            .candidates
            .get_mut(id)
            .ok_or_else(|| HrError::not_found("candidate", id))?;
        candidate.stage = stage;
        Ok(candidate.clone())
    }

    /// Book the interview and move its candidate to the interview stage.
    pub fn schedule_interview(&mut self, interview: Interview) -> HrResult<Interview> {
        let candidate = self
            .candidates
            .get_mut(&interview.candidate_id)
            .ok_or_else(|| HrError::not_found("candidate", interview.candidate_id.clone()))?;
        candidate.stage = CandidateStage::Interview;
        debug!(candidate = %candidate.id, "candidate moved to interview stage");
        self.interviews.upsert(interview.clone());
        Ok(interview)
    }

    pub fn add_session(&mut self, session: TrainingSession) -> HrResult<TrainingSession> {
        if !self.courses.contains(&session.course_id) {
            return Err(HrError::not_found("course", session.course_id));
        }
        self.sessions.upsert(session.clone());
        Ok(session)
    }

    pub fn set_session_status(
        &mut self,
        id: &str,
        status: SessionStatus,
    ) -> HrResult<TrainingSession> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| HrError::not_found("session", id))?;
        session.status = status;
        Ok(session.clone())
    }

    /// Record the enrollment and count it on the course.
    pub fn enroll(&mut self, enrollment: Enrollment) -> HrResult<Enrollment> {
        self.employee(&enrollment.employee_id)?;
        let course = self
            .courses
            .get_mut(&enrollment.course_id)
            .ok_or_else(|| HrError::not_found("course", enrollment.course_id.clone()))?;
        course.enrolled += 1;
        self.enrollments.upsert(enrollment.clone());
        Ok(enrollment)
    }

    /// Update an enrollment's progress. Reaching 100% completes it, issues the
    /// certificate and counts one completion on the course, once.
    pub fn record_progress(
        &mut self,
        id: &str,
        progress: u32,
        score: Option<u32>,
        today: NaiveDate,
    ) -> HrResult<Enrollment> {
        let enrollment = self
            .enrollments
            .get_mut(id)
            .ok_or_else(|| HrError::not_found("enrollment", id))?;
        let progress = progress.min(100);
        let newly_completed =
            progress == 100 && enrollment.status != EnrollmentStatus::Completed;
        enrollment.progress = progress;
        if score.is_some() {
            enrollment.score = score;
        }
        if progress == 100 {
            enrollment.status = EnrollmentStatus::Completed;
            enrollment.certificate_issued = true;
            enrollment.completion_date.get_or_insert(today);
        } else if progress > 0 && enrollment.status == EnrollmentStatus::Enrolled {
            enrollment.status = EnrollmentStatus::InProgress;
        }
        let updated = enrollment.clone();
        if newly_completed {
            if let Some(course) = self.courses.get_mut(&updated.course_id) {
                course.completed += 1;
            }
        }
        Ok(updated)
    }

    /// Flip the read flag on the listed notifications. Returns how many exist.
    pub fn set_read(&mut self, ids: &[String], read: bool) -> usize {
        let mut touched = 0;
        for id in ids {
            if let Some(notification) = self.notifications.get_mut(id) {
                notification.read = read;
                touched += 1;
            }
        }
        touched
    }

    pub fn mark_all_read(&mut self) -> usize {
        let mut touched = 0;
        for notification in self.notifications.iter_mut() {
            if !notification.read {
                notification.read = true;
                touched += 1;
            }
        }
        touched
    }
}

/// Cheap to clone; every clone sees the same collections.
#[derive(Clone, Debug)]
pub struct HrStore {
    inner: Arc<RwLock<Collections>>,
}

impl HrStore {
    pub fn new(collections: Collections) -> Self {
        Self {
            inner: Arc::new(RwLock::new(collections)),
        }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    pub async fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}
