//! HR dashboard core.
//!
//! [`HrModule`] is the one entry point the server talks to. It owns the shared
//! [`HrStore`] and the mock [`Processor`]; every view reads from the same
//! store, so an edit made through one view shows up in all of them.

pub mod error;
pub mod fixtures;
pub mod forms;
pub mod metrics;
pub mod processing;
pub mod query;
pub mod reports;
pub mod store;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::{
    AttendanceDay, Candidate, CandidateStage, Course, Employee, Enrollment, Interview,
    Notification, NotificationTemplate, PayrollRecord, Position, SessionStatus, Settings,
    TrainingSession,
};
use tracing::{info, instrument};
use uuid::Uuid;

pub use error::{HrError, HrResult};
pub use processing::{Job, Processor};
pub use reports::{ExportDataset, Report, ReportFilters, ReportKind};
pub use store::{Collections, HrStore};

use crate::{
    forms::{
        CourseForm, EmployeeForm, EnrollmentForm, InterviewForm, NotificationForm, PasswordForm,
        PayrollEditForm, PositionForm, SessionForm, TemplateForm,
    },
    metrics::{
        AttendanceSummary, NotificationSummary, PayrollSummary, PerformanceSummary,
        PipelineColumn, RecruitmentSummary, TrainingSummary, WorkforceOverview,
    },
    query::{
        CandidateFilter, CourseFilter, EmployeeFilter, NotificationFilter, PayrollFilter,
        PayrollRow, PositionFilter, RosterFilter,
    },
};

/// Fresh record id.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Clone, Debug)]
pub struct HrModule {
    store: HrStore,
    processor: Processor,
}

impl HrModule {
    pub fn new(store: HrStore, processor: Processor) -> Self {
        Self { store, processor }
    }

    /// The demo data set for `seed`.
    pub fn seeded(seed: u64, processor: Processor) -> Self {
        Self::new(HrStore::new(fixtures::seed(seed)), processor)
    }

    /// No records, demo account settings.
    pub fn empty(processor: Processor) -> Self {
        Self::new(
            HrStore::new(Collections::empty(fixtures::settings())),
            processor,
        )
    }

    pub fn store(&self) -> &HrStore {
        &self.store
    }

    // Workforce

    pub async fn overview(&self) -> WorkforceOverview {
        self.store
            .read(|c| metrics::workforce_overview(c.employees.all()))
            .await
    }

    pub async fn employees(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        self.store
            .read(|c| query::filter_employees(c.employees.all(), filter))
            .await
    }

    pub async fn employee(&self, id: &str) -> HrResult<Employee> {
        self.store.read(|c| c.employee(id).cloned()).await
    }

    pub async fn departments(&self) -> Vec<String> {
        self.store.read(Collections::departments).await
    }

    #[instrument(skip_all, fields(department = %form.department))]
    pub async fn add_employee(&self, form: &EmployeeForm) -> HrResult<Employee> {
        let employee = form.create(new_id(), today())?;
        self.store
            .write(|c| c.employees.upsert(employee.clone()))
            .await;
        info!(employee = %employee.id, "employee added");
        Ok(employee)
    }

    #[instrument(skip(self, form))]
    pub async fn update_employee(&self, id: &str, form: &EmployeeForm) -> HrResult<Employee> {
        self.store
            .write(|c| -> HrResult<Employee> {
                let updated = form.apply(c.employee(id)?)?;
                c.replace_employee(updated.clone())?;
                Ok(updated)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: &str) -> HrResult<Employee> {
        let removed = self.store.write(|c| c.remove_employee(id)).await?;
        info!(employee = %removed.id, "employee removed");
        Ok(removed)
    }

    // Attendance and performance

    pub async fn attendance_summary(&self) -> AttendanceSummary {
        self.store
            .read(|c| metrics::attendance_summary(&c.attendance, c.employees.all()))
            .await
    }

    pub async fn attendance_on(&self, day: NaiveDate) -> Option<AttendanceDay> {
        self.store
            .read(|c| c.attendance.iter().find(|d| d.date == day).cloned())
            .await
    }

    pub async fn roster(&self, filter: &RosterFilter) -> Vec<Employee> {
        self.store
            .read(|c| query::filter_roster(c.employees.all(), filter))
            .await
    }

    pub async fn performance_summary(&self, department: Option<&str>) -> PerformanceSummary {
        let department = department.filter(|d| !d.eq_ignore_ascii_case("all"));
        self.store
            .read(|c| metrics::performance_summary(c.employees.all(), &c.performance, department))
            .await
    }

    // Payroll

    pub async fn payroll(&self, filter: &PayrollFilter) -> Vec<PayrollRow> {
        self.store
            .read(|c| query::payroll_rows(c.payroll.all(), c.employees.all(), filter))
            .await
    }

    pub async fn payroll_summary(&self) -> PayrollSummary {
        self.store
            .read(|c| {
                metrics::payroll_summary(&query::join_payroll(c.payroll.all(), c.employees.all()))
            })
            .await
    }

    #[instrument(skip(self, form))]
    pub async fn update_payroll(
        &self,
        id: &str,
        form: &PayrollEditForm,
    ) -> HrResult<PayrollRecord> {
        self.store
            .write(|c| -> HrResult<PayrollRecord> {
                let current = c
                    .payroll
                    .get(id)
                    .ok_or_else(|| HrError::not_found("payroll record", id))?;
                let updated = form.apply(current)?;
                c.replace_payroll(updated.clone())?;
                Ok(updated)
            })
            .await
    }

    /// Simulated payroll run over the selected employees. Records are left
    /// as they are.
    #[instrument(skip_all, fields(selected = employee_ids.len()))]
    pub async fn process_payroll(&self, employee_ids: &[String]) -> HrResult<String> {
        let job = Job::payroll_run(employee_ids)?;
        Ok(self.processor.run(job).await)
    }

    // Recruitment

    pub async fn positions(&self, filter: &PositionFilter) -> Vec<Position> {
        self.store
            .read(|c| query::filter_positions(c.positions.all(), filter))
            .await
    }

    pub async fn candidates(&self, filter: &CandidateFilter) -> Vec<Candidate> {
        self.store
            .read(|c| query::filter_candidates(c.candidates.all(), c.positions.all(), filter))
            .await
    }

    pub async fn interviews(&self) -> Vec<Interview> {
        self.store.read(|c| c.interviews.all().to_vec()).await
    }

    pub async fn pipeline(&self) -> Vec<PipelineColumn> {
        self.store
            .read(|c| metrics::kanban(c.candidates.all()))
            .await
    }

    pub async fn recruitment_summary(&self) -> RecruitmentSummary {
        self.store
            .read(|c| {
                metrics::recruitment_summary(
                    c.positions.all(),
                    c.candidates.all(),
                    c.interviews.all(),
                )
            })
            .await
    }

    #[instrument(skip_all, fields(title = %form.title))]
    pub async fn add_position(&self, form: &PositionForm) -> HrResult<Position> {
        let position = form.create(new_id(), today())?;
        self.store
            .write(|c| c.positions.upsert(position.clone()))
            .await;
        Ok(position)
    }

    #[instrument(skip(self, form))]
    pub async fn update_position(&self, id: &str, form: &PositionForm) -> HrResult<Position> {
        self.store
            .write(|c| -> HrResult<Position> {
                let current = c
                    .positions
                    .get(id)
                    .ok_or_else(|| HrError::not_found("position", id))?;
                let updated = form.apply(current)?;
                c.positions.upsert(updated.clone());
                Ok(updated)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_position(&self, id: &str) -> HrResult<Position> {
        self.store
            .write(|c| c.positions.remove(id))
            .await
            .ok_or_else(|| HrError::not_found("position", id))
    }

    #[instrument(skip(self))]
    pub async fn move_candidate(&self, id: &str, stage: CandidateStage) -> HrResult<Candidate> {
        self.store
            .write(|c| c.set_candidate_stage(id, stage))
            .await
    }

    /// Books the interview and moves the candidate in one write.
    #[instrument(skip_all, fields(candidate = %form.candidate_id))]
    pub async fn schedule_interview(&self, form: &InterviewForm) -> HrResult<Interview> {
        let interview = self
            .store
            .write(|c| -> HrResult<Interview> {
                let candidate = c
                    .candidates
                    .get(&form.candidate_id)
                    .ok_or_else(|| HrError::not_found("candidate", form.candidate_id.clone()))?;
                let interview = form.build(new_id(), candidate)?;
                c.schedule_interview(interview)
            })
            .await?;
        info!(interview = %interview.id, "interview scheduled");
        Ok(interview)
    }

    // Training

    pub async fn courses(&self, filter: &CourseFilter) -> Vec<Course> {
        self.store
            .read(|c| query::filter_courses(c.courses.all(), filter))
            .await
    }

    pub async fn sessions(&self) -> Vec<TrainingSession> {
        self.store.read(|c| c.sessions.all().to_vec()).await
    }

    pub async fn upcoming_sessions(&self, now: NaiveDateTime) -> Vec<TrainingSession> {
        self.store
            .read(|c| metrics::upcoming_sessions(c.sessions.all(), now))
            .await
    }

    pub async fn sessions_on(&self, day: NaiveDate) -> Vec<TrainingSession> {
        self.store
            .read(|c| metrics::sessions_on(c.sessions.all(), day))
            .await
    }

    pub async fn enrollments(&self) -> Vec<Enrollment> {
        self.store.read(|c| c.enrollments.all().to_vec()).await
    }

    pub async fn training_summary(&self) -> TrainingSummary {
        self.store
            .read(|c| {
                metrics::training_summary(c.courses.all(), c.enrollments.all(), c.employees.all())
            })
            .await
    }

    #[instrument(skip_all, fields(course = %form.course_name))]
    pub async fn add_course(&self, form: &CourseForm) -> HrResult<Course> {
        let course = form.create(new_id())?;
        self.store.write(|c| c.courses.upsert(course.clone())).await;
        Ok(course)
    }

    #[instrument(skip(self, form))]
    pub async fn update_course(&self, id: &str, form: &CourseForm) -> HrResult<Course> {
        self.store
            .write(|c| -> HrResult<Course> {
                let current = c
                    .courses
                    .get(id)
                    .ok_or_else(|| HrError::not_found("course", id))?;
                let updated = form.apply(current)?;
                c.courses.upsert(updated.clone());
                Ok(updated)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_course(&self, id: &str) -> HrResult<Course> {
        self.store
            .write(|c| c.courses.remove(id))
            .await
            .ok_or_else(|| HrError::not_found("course", id))
    }

    #[instrument(skip_all, fields(course = %form.course_id))]
    pub async fn add_session(&self, form: &SessionForm) -> HrResult<TrainingSession> {
        let session = form.build(new_id())?;
        self.store.write(|c| c.add_session(session)).await
    }

    #[instrument(skip(self))]
    pub async fn set_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> HrResult<TrainingSession> {
        self.store
            .write(|c| c.set_session_status(id, status))
            .await
    }

    /// Records the enrollment and bumps the course's count in one write.
    #[instrument(skip_all, fields(course = %form.course_id, employee = %form.employee_id))]
    pub async fn enroll(&self, form: &EnrollmentForm) -> HrResult<Enrollment> {
        let enrollment = form.build(new_id(), today())?;
        self.store.write(|c| c.enroll(enrollment)).await
    }

    #[instrument(skip(self))]
    pub async fn record_progress(
        &self,
        id: &str,
        progress: u32,
        score: Option<u32>,
    ) -> HrResult<Enrollment> {
        self.store
            .write(|c| c.record_progress(id, progress, score, today()))
            .await
    }

    // Notifications

    pub async fn notifications(&self, filter: &NotificationFilter) -> Vec<Notification> {
        self.store
            .read(|c| query::filter_notifications(c.notifications.all(), filter))
            .await
    }

    pub async fn notification_summary(&self) -> NotificationSummary {
        self.store
            .read(|c| metrics::notification_summary(c.notifications.all()))
            .await
    }

    pub async fn templates(&self) -> Vec<NotificationTemplate> {
        self.store.read(|c| c.templates.all().to_vec()).await
    }

    /// New notifications go to the top of the inbox.
    #[instrument(skip_all, fields(category = %form.category))]
    pub async fn create_notification(&self, form: &NotificationForm) -> HrResult<Notification> {
        let notification = form.build(new_id(), Utc::now())?;
        self.store
            .write(|c| c.notifications.prepend(notification.clone()))
            .await;
        Ok(notification)
    }

    /// Returns how many of `ids` exist.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, ids: &[String], read: bool) -> usize {
        self.store.write(|c| c.set_read(ids, read)).await
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> usize {
        self.store.write(Collections::mark_all_read).await
    }

    #[instrument(skip(self))]
    pub async fn delete_notifications(&self, ids: &[String]) -> usize {
        self.store.write(|c| c.notifications.remove_many(ids)).await
    }

    /// Creates a template, or replaces the one with `id`.
    #[instrument(skip(self, form))]
    pub async fn save_template(
        &self,
        id: Option<&str>,
        form: &TemplateForm,
    ) -> HrResult<NotificationTemplate> {
        let template_id = id.map_or_else(new_id, str::to_string);
        let template = form.build(template_id)?;
        self.store
            .write(|c| -> HrResult<NotificationTemplate> {
                if id.is_some() && !c.templates.contains(&template.id) {
                    return Err(HrError::not_found("template", template.id.clone()));
                }
                c.templates.upsert(template.clone());
                Ok(template)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_template(&self, id: &str) -> HrResult<NotificationTemplate> {
        self.store
            .write(|c| c.templates.remove(id))
            .await
            .ok_or_else(|| HrError::not_found("template", id))
    }

    // Settings

    pub async fn settings(&self) -> Settings {
        self.store.read(|c| c.settings.clone()).await
    }

    #[instrument(skip_all)]
    pub async fn save_settings(&self, settings: Settings) -> String {
        let message = self.processor.run(Job::SaveSettings).await;
        self.store.write(|c| c.settings = settings).await;
        message
    }

    /// Validation only; no password is stored anywhere.
    #[instrument(skip_all)]
    pub async fn update_password(&self, form: &PasswordForm) -> HrResult<String> {
        form.validate()?;
        Ok(self.processor.run(Job::UpdatePassword).await)
    }

    #[instrument(skip(self))]
    pub async fn export_data(&self, dataset: ExportDataset) -> HrResult<(Report, String)> {
        let message = self.processor.run(Job::Export(dataset)).await;
        let report = self
            .report(dataset.report(), &ReportFilters::default(), today())
            .await?;
        Ok((report, message))
    }

    #[instrument(skip(self))]
    pub async fn backup(&self) -> String {
        self.processor.run(Job::Backup).await
    }

    // Reports

    #[instrument(skip(self, filters))]
    pub async fn report(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
        today: NaiveDate,
    ) -> HrResult<Report> {
        self.store
            .read(|c| reports::build_report(kind, c, filters, today))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ReadFilter;

    fn module() -> HrModule {
        HrModule::seeded(fixtures::DEFAULT_SEED, Processor::instant())
    }

    fn employee_form(name: &str, department: &str) -> EmployeeForm {
        EmployeeForm {
            name: name.into(),
            email: format!("{}@company.com", name.to_lowercase().replace(' ', ".")),
            department: department.into(),
            role: "Analyst".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn an_added_employee_is_seen_everywhere() {
        let hr = module();
        let added = hr
            .add_employee(&employee_form("Nina Park", "Analytics"))
            .await
            .unwrap();
        let filter = EmployeeFilter {
            department: Some("Analytics".into()),
            ..Default::default()
        };
        let found = hr.employees(&filter).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, added.id);
        assert_eq!(hr.overview().await.total_employees, 11);
        assert!(hr.departments().await.contains(&"Analytics".to_string()));
    }

    #[tokio::test]
    async fn deleting_an_employee_drops_their_payroll_row() {
        let hr = module();
        hr.delete_employee("4").await.unwrap();
        assert!(hr.employee("4").await.unwrap_err().is_not_found());
        let rows = hr.payroll(&PayrollFilter::default()).await;
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(|r| r.record.employee_id != "4"));
        assert_eq!(hr.payroll_summary().await.record_count, 9);
    }

    #[tokio::test]
    async fn payroll_edit_keeps_net_pay_consistent() {
        let hr = module();
        let before = hr
            .store()
            .read(|c| c.payroll.get("payroll-2").cloned())
            .await
            .unwrap();
        let form = PayrollEditForm {
            overtime: "0".into(),
            bonus: "500".into(),
            ..Default::default()
        };
        let updated = hr.update_payroll("payroll-2", &form).await.unwrap();
        assert_eq!(updated.overtime, before.overtime);
        assert_eq!(
            updated.net_pay(),
            72_000 + before.overtime + 500 - updated.taxes - updated.deductions
        );
        let row = hr
            .payroll(&PayrollFilter {
                search: Some("michael".into()),
                ..Default::default()
            })
            .await
            .remove(0);
        assert_eq!(row.record, updated);
    }

    #[tokio::test]
    async fn oversized_payroll_edit_leaves_the_record_alone() {
        let hr = module();
        let before = hr.payroll_summary().await;
        let form = PayrollEditForm {
            base_salary: "9223372036854775807".into(),
            ..Default::default()
        };
        let err = hr.update_payroll("payroll-1", &form).await.unwrap_err();
        assert!(matches!(err, HrError::InvalidValue { field: "baseSalary", .. }));
        let after = hr.payroll_summary().await;
        assert_eq!(after.total_net, before.total_net);
    }

    #[tokio::test]
    async fn payroll_run_needs_a_selection() {
        let hr = module();
        assert_eq!(hr.process_payroll(&[]).await, Err(HrError::EmptySelection));
        let message = hr
            .process_payroll(&["1".to_string(), "2".to_string()])
            .await
            .unwrap();
        assert_eq!(message, "Payroll processed successfully for 2 employees!");
    }

    #[tokio::test]
    async fn interview_moves_candidate_to_interview_stage() {
        let hr = module();
        let form = InterviewForm {
            candidate_id: "3".into(),
            date: "2024-02-01".into(),
            time: "11:00".into(),
            interviewer: "Sarah Johnson".into(),
            ..Default::default()
        };
        let interview = hr.schedule_interview(&form).await.unwrap();
        assert_eq!(interview.candidate_name, "Mike Chen");
        let candidates = hr.candidates(&CandidateFilter::default()).await;
        let mike = candidates.iter().find(|c| c.id == "3").unwrap();
        assert_eq!(mike.stage, CandidateStage::Interview);
        assert_eq!(hr.recruitment_summary().await.scheduled_interviews, 3);
    }

    #[tokio::test]
    async fn enrolling_counts_on_the_course() {
        let hr = module();
        let form = EnrollmentForm {
            employee_id: "3".into(),
            course_id: "2".into(),
        };
        let enrollment = hr.enroll(&form).await.unwrap();
        let course = hr
            .courses(&CourseFilter::default())
            .await
            .into_iter()
            .find(|c| c.id == "2")
            .unwrap();
        assert_eq!(course.enrolled, 46);

        hr.record_progress(&enrollment.id, 100, Some(95)).await.unwrap();
        let summary = hr.training_summary().await;
        assert_eq!(summary.total_completed, 187);
        let leaders: Vec<(&str, u32)> = summary
            .top_learners
            .iter()
            .map(|t| (t.employee_name.as_str(), t.score))
            .collect();
        assert_eq!(leaders, [("Emily Rodriguez", 95), ("Michael Chen", 92)]);

        let stranger = EnrollmentForm {
            employee_id: "missing".into(),
            course_id: "2".into(),
        };
        assert!(hr.enroll(&stranger).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn notifications_prepend_and_mark_read() {
        let hr = module();
        let form = NotificationForm {
            title: "Benefits enrollment".into(),
            message: "Open until Friday".into(),
            category: "HR".into(),
            ..Default::default()
        };
        let created = hr.create_notification(&form).await.unwrap();
        let inbox = hr.notifications(&NotificationFilter::default()).await;
        assert_eq!(inbox[0].id, created.id);

        assert_eq!(hr.mark_read(&[created.id.clone()], true).await, 1);
        assert_eq!(hr.mark_all_read().await, 4);
        let unread = hr
            .notifications(&NotificationFilter {
                read: ReadFilter::Unread,
                ..Default::default()
            })
            .await;
        assert!(unread.is_empty());
        assert_eq!(hr.delete_notifications(&["1".into(), "nope".into()]).await, 1);
    }

    #[tokio::test]
    async fn templates_update_in_place() {
        let hr = module();
        let form = TemplateForm {
            name: "Attendance Warning".into(),
            subject: "Attendance Alert".into(),
            triggers: "low_attendance, repeated_lateness".into(),
            ..Default::default()
        };
        let saved = hr.save_template(Some("3"), &form).await.unwrap();
        assert_eq!(saved.triggers.len(), 2);
        assert_eq!(hr.templates().await.len(), 3);
        assert!(hr.save_template(Some("99"), &form).await.is_err());
    }

    #[tokio::test]
    async fn settings_jobs_report_success() {
        let hr = module();
        let mut settings = hr.settings().await;
        settings.preferences.theme = "dark".into();
        assert_eq!(hr.save_settings(settings).await, "Settings saved successfully");
        assert_eq!(hr.settings().await.preferences.theme, "dark");

        let weak = PasswordForm {
            current_password: "old".into(),
            new_password: "short".into(),
            confirm_password: "short".into(),
        };
        assert_eq!(hr.update_password(&weak).await, Err(HrError::PasswordTooShort));

        let (report, message) = hr.export_data(ExportDataset::Employees).await.unwrap();
        assert!(report.filename.starts_with("employees-export-"));
        assert_eq!(message, "employees data exported successfully!");
        assert_eq!(hr.backup().await, "Backup created successfully!");
    }

    #[tokio::test]
    async fn empty_module_has_no_averages() {
        let hr = HrModule::empty(Processor::instant());
        assert_eq!(hr.overview().await.average_performance, None);
        assert_eq!(hr.training_summary().await.completion_rate, 0);
        let err = hr
            .report(ReportKind::Payroll, &ReportFilters::default(), today())
            .await
            .unwrap_err();
        assert_eq!(err, HrError::NoReportData);
    }
}
