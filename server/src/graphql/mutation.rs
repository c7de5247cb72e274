use async_graphql::{Context, Object, SimpleObject};
use entity::{
    Candidate, CandidateStage, Course, Employee, Enrollment, Interview, Notification,
    NotificationTemplate, PayrollRecord, Position, SessionStatus, Settings, TrainingSession,
};
use products_hr::{
    ExportDataset, Report,
    forms::{
        CourseForm, EmployeeForm, EnrollmentForm, InterviewForm, NotificationForm, PasswordForm,
        PayrollEditForm, PositionForm, SessionForm, TemplateForm,
    },
};
use tracing::instrument;

use super::{domain_error, module};

#[derive(Default)]
pub struct HrMutation;

/// What a simulated back-office job reports when it finishes.
#[derive(Clone, Debug, SimpleObject)]
pub struct JobOutcome {
    pub message: String,
}

impl From<String> for JobOutcome {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ExportOutcome {
    pub message: String,
    pub report: Report,
}

#[Object]
impl HrMutation {
    #[instrument(name = "graphql.hr.add_employee", skip_all)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        input: EmployeeForm,
    ) -> async_graphql::Result<Employee> {
        module(ctx)?.add_employee(&input).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.update_employee", skip(self, ctx, input))]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: EmployeeForm,
    ) -> async_graphql::Result<Employee> {
        module(ctx)?
            .update_employee(&id, &input)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.delete_employee", skip(self, ctx))]
    async fn delete_employee(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Employee> {
        module(ctx)?.delete_employee(&id).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.update_payroll", skip(self, ctx, input))]
    async fn update_payroll(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: PayrollEditForm,
    ) -> async_graphql::Result<PayrollRecord> {
        module(ctx)?
            .update_payroll(&id, &input)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.process_payroll", skip_all)]
    async fn process_payroll(
        &self,
        ctx: &Context<'_>,
        employee_ids: Vec<String>,
    ) -> async_graphql::Result<JobOutcome> {
        module(ctx)?
            .process_payroll(&employee_ids)
            .await
            .map(JobOutcome::from)
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.add_position", skip_all)]
    async fn add_position(
        &self,
        ctx: &Context<'_>,
        input: PositionForm,
    ) -> async_graphql::Result<Position> {
        module(ctx)?.add_position(&input).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.update_position", skip(self, ctx, input))]
    async fn update_position(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: PositionForm,
    ) -> async_graphql::Result<Position> {
        module(ctx)?
            .update_position(&id, &input)
            .await
            .map_err(domain_error)
    }

    async fn delete_position(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Position> {
        module(ctx)?.delete_position(&id).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.move_candidate", skip(self, ctx))]
    async fn move_candidate(
        &self,
        ctx: &Context<'_>,
        id: String,
        stage: CandidateStage,
    ) -> async_graphql::Result<Candidate> {
        module(ctx)?
            .move_candidate(&id, stage)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.schedule_interview", skip_all)]
    async fn schedule_interview(
        &self,
        ctx: &Context<'_>,
        input: InterviewForm,
    ) -> async_graphql::Result<Interview> {
        module(ctx)?
            .schedule_interview(&input)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.add_course", skip_all)]
    async fn add_course(
        &self,
        ctx: &Context<'_>,
        input: CourseForm,
    ) -> async_graphql::Result<Course> {
        module(ctx)?.add_course(&input).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.update_course", skip(self, ctx, input))]
    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: CourseForm,
    ) -> async_graphql::Result<Course> {
        module(ctx)?
            .update_course(&id, &input)
            .await
            .map_err(domain_error)
    }

    async fn delete_course(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Course> {
        module(ctx)?.delete_course(&id).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.add_session", skip_all)]
    async fn add_session(
        &self,
        ctx: &Context<'_>,
        input: SessionForm,
    ) -> async_graphql::Result<TrainingSession> {
        module(ctx)?.add_session(&input).await.map_err(domain_error)
    }

    /// `IN_PROGRESS` starts a session; `COMPLETED` closes it.
    async fn set_session_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: SessionStatus,
    ) -> async_graphql::Result<TrainingSession> {
        module(ctx)?
            .set_session_status(&id, status)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.enroll", skip_all)]
    async fn enroll(
        &self,
        ctx: &Context<'_>,
        input: EnrollmentForm,
    ) -> async_graphql::Result<Enrollment> {
        module(ctx)?.enroll(&input).await.map_err(domain_error)
    }

    async fn record_progress(
        &self,
        ctx: &Context<'_>,
        id: String,
        progress: u32,
        score: Option<u32>,
    ) -> async_graphql::Result<Enrollment> {
        module(ctx)?
            .record_progress(&id, progress, score)
            .await
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.create_notification", skip_all)]
    async fn create_notification(
        &self,
        ctx: &Context<'_>,
        input: NotificationForm,
    ) -> async_graphql::Result<Notification> {
        module(ctx)?
            .create_notification(&input)
            .await
            .map_err(domain_error)
    }

    /// Returns how many of the ids were found.
    async fn mark_read(
        &self,
        ctx: &Context<'_>,
        ids: Vec<String>,
        #[graphql(default = true)] read: bool,
    ) -> async_graphql::Result<usize> {
        Ok(module(ctx)?.mark_read(&ids, read).await)
    }

    async fn mark_all_read(&self, ctx: &Context<'_>) -> async_graphql::Result<usize> {
        Ok(module(ctx)?.mark_all_read().await)
    }

    async fn delete_notifications(
        &self,
        ctx: &Context<'_>,
        ids: Vec<String>,
    ) -> async_graphql::Result<usize> {
        Ok(module(ctx)?.delete_notifications(&ids).await)
    }

    /// Without an id a new template is created.
    #[instrument(name = "graphql.hr.save_template", skip(self, ctx, input))]
    async fn save_template(
        &self,
        ctx: &Context<'_>,
        id: Option<String>,
        input: TemplateForm,
    ) -> async_graphql::Result<NotificationTemplate> {
        module(ctx)?
            .save_template(id.as_deref(), &input)
            .await
            .map_err(domain_error)
    }

    async fn delete_template(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<NotificationTemplate> {
        module(ctx)?.delete_template(&id).await.map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.save_settings", skip_all)]
    async fn save_settings(
        &self,
        ctx: &Context<'_>,
        input: Settings,
    ) -> async_graphql::Result<JobOutcome> {
        Ok(module(ctx)?.save_settings(input).await.into())
    }

    #[instrument(name = "graphql.hr.update_password", skip_all)]
    async fn update_password(
        &self,
        ctx: &Context<'_>,
        input: PasswordForm,
    ) -> async_graphql::Result<JobOutcome> {
        module(ctx)?
            .update_password(&input)
            .await
            .map(JobOutcome::from)
            .map_err(domain_error)
    }

    #[instrument(name = "graphql.hr.export_data", skip(self, ctx))]
    async fn export_data(
        &self,
        ctx: &Context<'_>,
        dataset: ExportDataset,
    ) -> async_graphql::Result<ExportOutcome> {
        let (report, message) = module(ctx)?
            .export_data(dataset)
            .await
            .map_err(domain_error)?;
        Ok(ExportOutcome { message, report })
    }

    #[instrument(name = "graphql.hr.backup", skip_all)]
    async fn backup(&self, ctx: &Context<'_>) -> async_graphql::Result<JobOutcome> {
        Ok(module(ctx)?.backup().await.into())
    }
}
