//! Simulated back-office jobs.
//!
//! Nothing is actually processed: a job waits out its fixed delay and then
//! reports success. The delay is multiplied by the processor's scale, which
//! tests and demos set to zero.

use std::time::Duration;

use entity::Label;
use tracing::info;

use crate::{
    error::{HrError, HrResult},
    reports::ExportDataset,
};

const MAX_SCALE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    PayrollRun { employees: usize },
    SaveSettings,
    UpdatePassword,
    Export(ExportDataset),
    Backup,
}

impl Job {
    /// A payroll run needs at least one selected employee.
    pub fn payroll_run(selected: &[String]) -> HrResult<Self> {
        if selected.is_empty() {
            return Err(HrError::EmptySelection);
        }
        Ok(Self::PayrollRun {
            employees: selected.len(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PayrollRun { .. } => "payroll_run",
            Self::SaveSettings => "save_settings",
            Self::UpdatePassword => "update_password",
            Self::Export(_) => "export",
            Self::Backup => "backup",
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Self::PayrollRun { .. } => Duration::from_secs(1),
            Self::UpdatePassword => Duration::from_millis(1_500),
            Self::SaveSettings | Self::Export(_) => Duration::from_secs(2),
            Self::Backup => Duration::from_secs(3),
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::PayrollRun { employees } => {
                format!("Payroll processed successfully for {employees} employees!")
            }
            Self::SaveSettings => "Settings saved successfully".to_string(),
            Self::UpdatePassword => "Password updated successfully!".to_string(),
            Self::Export(dataset) => format!("{} data exported successfully!", dataset.as_str()),
            Self::Backup => "Backup created successfully!".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Processor {
    scale: f64,
}

impl Default for Processor {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Processor {
    /// Negative or non-finite scales run instantly.
    pub fn new(scale: f64) -> Self {
        let scale = if scale.is_finite() {
            scale.clamp(0.0, MAX_SCALE)
        } else {
            0.0
        };
        Self { scale }
    }

    pub fn instant() -> Self {
        Self { scale: 0.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn wait_for(&self, job: &Job) -> Duration {
        job.delay().mul_f64(self.scale)
    }

    /// Always succeeds; returns the message shown to the user.
    pub async fn run(&self, job: Job) -> String {
        let wait = self.wait_for(&job);
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        info!(job = job.name(), waited_ms = wait.as_millis() as u64, "mock job finished");
        job.success_message()
    }
}
