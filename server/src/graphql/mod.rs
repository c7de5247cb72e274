mod mutation;
mod query;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject};
use platform_api::{ApiError, ApiResult};
use products_hr::{HrError, HrModule};
use serde::Serialize;
use tracing::instrument;

pub use mutation::HrMutation;
pub use query::HrQuery;

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(hr: HrModule) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(hr)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> ApiResult<HealthPayload> {
        Ok(HealthPayload { ok: true })
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> ApiResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn hr(&self) -> HrQuery {
        HrQuery
    }
}

#[Object]
impl MutationRoot {
    async fn hr(&self) -> HrMutation {
        HrMutation
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}

fn module<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a HrModule> {
    ctx.data::<HrModule>()
}

/// Lookups that miss become `NOT_FOUND`; everything else the user can fix.
pub fn api_error(err: HrError) -> ApiError {
    match err {
        HrError::NotFound { kind, id } => ApiError::NotFound(format!("{kind} {id}")),
        other => ApiError::invalid(other.to_string()),
    }
}

fn domain_error(err: HrError) -> async_graphql::Error {
    api_error(err).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Value};
    use products_hr::{Processor, fixtures::DEFAULT_SEED};
    use serde_json::json;

    fn schema() -> SchemaType {
        build_schema(HrModule::seeded(DEFAULT_SEED, Processor::instant()))
    }

    #[tokio::test]
    async fn health_query_returns_ok() {
        let schema = schema();
        let response = schema.execute(Request::new("{ health { ok } }")).await;
        assert!(response.errors.is_empty());
        let body = response.data.into_json().unwrap();
        assert_eq!(body, json!({"health": {"ok": true}}));
    }

    #[tokio::test]
    async fn employees_filter_by_department() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"{ hr { employees(filter: { department: "Engineering" }) { name } } }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"hr": {"employees": [{"name": "Sarah Johnson"}, {"name": "Robert Kim"}]}})
        );
    }

    #[tokio::test]
    async fn missing_fields_surface_as_invalid_input() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"mutation { hr { addEmployee(input: { name: "Nina" }) { id } } }"#,
            ))
            .await;
        assert_eq!(response.errors.len(), 1);
        let error = &response.errors[0];
        assert_eq!(error.message, "Please fill in all required fields");
        let code = error
            .extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned();
        assert_eq!(code, Some(Value::from("INVALID_INPUT")));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let schema = schema();
        let response = schema
            .execute(Request::new(r#"{ hr { employee(id: "404") { name } } }"#))
            .await;
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned();
        assert_eq!(code, Some(Value::from("NOT_FOUND")));
    }

    #[tokio::test]
    async fn scheduling_an_interview_moves_the_candidate() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"mutation {
                    hr {
                        scheduleInterview(input: {
                            candidateId: "3", date: "2024-02-01", time: "10:30",
                            interviewer: "Sarah Johnson"
                        }) { candidateName }
                    }
                }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let response = schema
            .execute(Request::new(
                r#"{ hr { candidates(filter: { stage: INTERVIEW }) { name } } }"#,
            ))
            .await;
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"hr": {"candidates": [{"name": "John Smith"}, {"name": "Mike Chen"}]}})
        );
    }

    #[tokio::test]
    async fn payroll_edit_reports_net_pay() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"mutation {
                    hr {
                        updatePayroll(id: "payroll-1", input: {
                            baseSalary: "85000", overtime: "100", bonus: "900",
                            taxes: "20000", deductions: "5000"
                        }) { netPay grossPay }
                    }
                }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"hr": {"updatePayroll": {"netPay": 61000, "grossPay": 86000}}})
        );
    }

    #[tokio::test]
    async fn oversized_payroll_amount_is_invalid_input() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"mutation {
                    hr {
                        updatePayroll(id: "payroll-1", input: {
                            baseSalary: "9223372036854775807"
                        }) { netPay }
                    }
                }"#,
            ))
            .await;
        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(Value::from("INVALID_INPUT")));

        let summary = schema
            .execute(Request::new("{ hr { payrollSummary { recordCount } } }"))
            .await;
        assert!(summary.errors.is_empty(), "{:?}", summary.errors);
    }

    #[tokio::test]
    async fn clicking_the_active_payroll_header_reverses_it() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"{ hr { payroll(filter: { sortBy: NAME, clicked: NAME }, page: { first: 2 }) { employeeName } } }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"hr": {"payroll": [
                {"employeeName": "Sarah Johnson"},
                {"employeeName": "Robert Kim"}
            ]}})
        );
    }

    #[tokio::test]
    async fn training_summary_lists_top_learners() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                "{ hr { trainingSummary { topLearners { rank employeeName courseName score } } } }",
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        assert_eq!(
            body,
            json!({"hr": {"trainingSummary": {"topLearners": [{
                "rank": 1,
                "employeeName": "Michael Chen",
                "courseName": "Technical Skills Bootcamp",
                "score": 92
            }]}}})
        );
    }

    #[tokio::test]
    async fn report_query_builds_a_csv() {
        let schema = schema();
        let response = schema
            .execute(Request::new(
                r#"{ hr { report(kind: PAYROLL, filters: { department: "Sales" }) { contentType body } } }"#,
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let body = response.data.into_json().unwrap();
        let csv = body["hr"]["report"]["body"].as_str().unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("\"Alex Turner\",\"Sales\""));
    }
}
