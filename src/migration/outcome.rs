use serde::Serialize;
use thiserror::Error;

use super::request::RequiredField;
use super::steps::StepName;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("{field} is required")]
    Configuration { field: RequiredField },
    #[error("{message}")]
    PreconditionNotMet { step: StepName, message: String },
    #[error("Failed to move model '{model}' to registry '{registry}'.")]
    MoveFailed { model: String, registry: String },
}

impl MigrationError {
    pub fn step(&self) -> StepName {
        match self {
            MigrationError::Configuration { .. } => StepName::ValidateInputs,
            MigrationError::PreconditionNotMet { step, .. } => *step,
            MigrationError::MoveFailed { .. } => StepName::MoveModel,
        }
    }
}

/// Terminal result of one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    pub succeeded: bool,
    pub failed_step: Option<StepName>,
    pub message: String,
    /// Steps that passed, in execution order.
    pub completed_steps: Vec<StepName>,
    pub correlation_id: String,
}

impl MigrationOutcome {
    pub fn success(message: String, completed_steps: Vec<StepName>, correlation_id: String) -> Self {
        Self {
            succeeded: true,
            failed_step: None,
            message,
            completed_steps,
            correlation_id,
        }
    }

    pub fn failure(error: &MigrationError, completed_steps: Vec<StepName>, correlation_id: String) -> Self {
        Self {
            succeeded: false,
            failed_step: Some(error.step()),
            message: error.to_string(),
            completed_steps,
            correlation_id,
        }
    }
}
