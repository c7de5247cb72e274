use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

/// Failures surfaced to the person using the dashboard. Messages are shown
/// verbatim, so they read as prompts rather than diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error("Please fill in all required fields")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid {field}: `{value}`")]
    InvalidValue { field: &'static str, value: String },
    #[error("Please fill in all password fields")]
    PasswordFieldsMissing,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Please select employees to process payroll")]
    EmptySelection,
    #[error("No data available to generate report")]
    NoReportData,
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("unknown report `{0}`")]
    UnknownReport(String),
}

impl HrError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
