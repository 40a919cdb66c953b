//! Model migration pipeline
//!
//! Validates the inputs, confirms the source and destination resources exist,
//! then shares the model version from the source workspace into the
//! destination registry. The first failing step ends the run.

pub mod orchestrator;
pub mod outcome;
pub mod request;
pub mod steps;

pub use orchestrator::MigrationOrchestrator;
pub use outcome::{MigrationError, MigrationOutcome};
pub use request::{MigrationInputs, MigrationRequest, RequiredField};
pub use steps::{PlannedStep, StepName};
