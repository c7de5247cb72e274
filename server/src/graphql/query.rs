use async_graphql::{Context, Object};
use chrono::{NaiveDate, Utc};
use entity::{
    AttendanceDay, Candidate, Course, Employee, Enrollment, Interview, Notification,
    NotificationTemplate, Position, Settings, TrainingSession,
};
use platform_api::Page;
use products_hr::{
    Report, ReportFilters, ReportKind,
    forms::PayrollEditForm,
    metrics::{
        self, AttendanceSummary, NotificationSummary, PayrollSummary, PerformanceSummary,
        PipelineColumn, RecruitmentSummary, TrainingSummary, WorkforceOverview,
    },
    query::{
        CandidateFilter, CourseFilter, EmployeeFilter, NotificationFilter, PayrollFilter,
        PayrollRow, PositionFilter, RosterFilter,
    },
};
use tracing::{Instrument, info_span, instrument};

use super::{domain_error, module};

#[derive(Default)]
pub struct HrQuery;

#[Object]
impl HrQuery {
    /// Dashboard cards and department breakdown.
    #[instrument(name = "graphql.hr.overview", skip_all)]
    async fn overview(&self, ctx: &Context<'_>) -> async_graphql::Result<WorkforceOverview> {
        Ok(module(ctx)?.overview().await)
    }

    async fn employees(
        &self,
        ctx: &Context<'_>,
        filter: Option<EmployeeFilter>,
        page: Option<Page>,
    ) -> async_graphql::Result<Vec<Employee>> {
        let filter = filter.unwrap_or_default();
        let span = info_span!(
            "hr.employees.list",
            has_search = filter.search.is_some(),
            department = filter.department.as_deref().unwrap_or("all"),
        );
        let rows = module(ctx)?.employees(&filter).instrument(span).await;
        Ok(page.unwrap_or_default().apply(rows))
    }

    #[instrument(name = "graphql.hr.employee", skip(self, ctx))]
    async fn employee(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Employee> {
        module(ctx)?.employee(&id).await.map_err(domain_error)
    }

    async fn departments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        Ok(module(ctx)?.departments().await)
    }

    #[instrument(name = "graphql.hr.attendance", skip_all)]
    async fn attendance(&self, ctx: &Context<'_>) -> async_graphql::Result<AttendanceSummary> {
        Ok(module(ctx)?.attendance_summary().await)
    }

    /// Headcount figures for one day, if recorded.
    async fn attendance_day(
        &self,
        ctx: &Context<'_>,
        date: NaiveDate,
    ) -> async_graphql::Result<Option<AttendanceDay>> {
        Ok(module(ctx)?.attendance_on(date).await)
    }

    /// Today's attendance table.
    async fn roster(
        &self,
        ctx: &Context<'_>,
        filter: Option<RosterFilter>,
    ) -> async_graphql::Result<Vec<Employee>> {
        Ok(module(ctx)?.roster(&filter.unwrap_or_default()).await)
    }

    #[instrument(name = "graphql.hr.performance", skip(self, ctx))]
    async fn performance(
        &self,
        ctx: &Context<'_>,
        department: Option<String>,
    ) -> async_graphql::Result<PerformanceSummary> {
        Ok(module(ctx)?
            .performance_summary(department.as_deref())
            .await)
    }

    async fn payroll(
        &self,
        ctx: &Context<'_>,
        filter: Option<PayrollFilter>,
        page: Option<Page>,
    ) -> async_graphql::Result<Vec<PayrollRow>> {
        let filter = filter.unwrap_or_default();
        let span = info_span!(
            "hr.payroll.list",
            has_search = filter.search.is_some(),
            sort = ?filter.sort_by,
            order = ?filter.order,
        );
        let rows = module(ctx)?.payroll(&filter).instrument(span).await;
        Ok(page.unwrap_or_default().apply(rows))
    }

    #[instrument(name = "graphql.hr.payroll_summary", skip_all)]
    async fn payroll_summary(&self, ctx: &Context<'_>) -> async_graphql::Result<PayrollSummary> {
        Ok(module(ctx)?.payroll_summary().await)
    }

    /// Net pay for the edit form as typed, blanks counted as zero.
    async fn payroll_preview(&self, input: PayrollEditForm) -> i64 {
        input.preview_net_pay()
    }

    async fn positions(
        &self,
        ctx: &Context<'_>,
        filter: Option<PositionFilter>,
    ) -> async_graphql::Result<Vec<Position>> {
        Ok(module(ctx)?.positions(&filter.unwrap_or_default()).await)
    }

    async fn candidates(
        &self,
        ctx: &Context<'_>,
        filter: Option<CandidateFilter>,
    ) -> async_graphql::Result<Vec<Candidate>> {
        Ok(module(ctx)?.candidates(&filter.unwrap_or_default()).await)
    }

    async fn interviews(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Interview>> {
        Ok(module(ctx)?.interviews().await)
    }

    /// Candidates bucketed by stage, every stage present.
    async fn pipeline(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PipelineColumn>> {
        Ok(module(ctx)?.pipeline().await)
    }

    #[instrument(name = "graphql.hr.recruitment_summary", skip_all)]
    async fn recruitment_summary(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<RecruitmentSummary> {
        Ok(module(ctx)?.recruitment_summary().await)
    }

    async fn courses(
        &self,
        ctx: &Context<'_>,
        filter: Option<CourseFilter>,
    ) -> async_graphql::Result<Vec<Course>> {
        Ok(module(ctx)?.courses(&filter.unwrap_or_default()).await)
    }

    async fn course_categories(&self) -> Vec<String> {
        metrics::training::COURSE_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    async fn sessions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TrainingSession>> {
        Ok(module(ctx)?.sessions().await)
    }

    async fn upcoming_sessions(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<TrainingSession>> {
        Ok(module(ctx)?
            .upcoming_sessions(Utc::now().naive_utc())
            .await)
    }

    async fn todays_sessions(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<TrainingSession>> {
        Ok(module(ctx)?.sessions_on(Utc::now().date_naive()).await)
    }

    async fn enrollments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Enrollment>> {
        Ok(module(ctx)?.enrollments().await)
    }

    #[instrument(name = "graphql.hr.training_summary", skip_all)]
    async fn training_summary(&self, ctx: &Context<'_>) -> async_graphql::Result<TrainingSummary> {
        Ok(module(ctx)?.training_summary().await)
    }

    async fn notifications(
        &self,
        ctx: &Context<'_>,
        filter: Option<NotificationFilter>,
        page: Option<Page>,
    ) -> async_graphql::Result<Vec<Notification>> {
        let filter = filter.unwrap_or_default();
        let span = info_span!(
            "hr.notifications.list",
            has_search = filter.search.is_some(),
            read = ?filter.read,
        );
        let rows = module(ctx)?.notifications(&filter).instrument(span).await;
        Ok(page.unwrap_or_default().apply(rows))
    }

    async fn notification_categories(&self) -> Vec<String> {
        metrics::engagement::NOTIFICATION_CATEGORIES
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[instrument(name = "graphql.hr.notification_summary", skip_all)]
    async fn notification_summary(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<NotificationSummary> {
        Ok(module(ctx)?.notification_summary().await)
    }

    async fn templates(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<NotificationTemplate>> {
        Ok(module(ctx)?.templates().await)
    }

    async fn settings(&self, ctx: &Context<'_>) -> async_graphql::Result<Settings> {
        Ok(module(ctx)?.settings().await)
    }

    /// Builds a report body without saving it anywhere.
    #[instrument(name = "graphql.hr.report", skip(self, ctx, filters))]
    async fn report(
        &self,
        ctx: &Context<'_>,
        kind: ReportKind,
        filters: Option<ReportFilters>,
    ) -> async_graphql::Result<Report> {
        module(ctx)?
            .report(kind, &filters.unwrap_or_default(), Utc::now().date_naive())
            .await
            .map_err(domain_error)
    }
}
