// Model Mover Library - Azure ML model migration
// This exposes the core components for testing and integration

pub mod actions;
pub mod cli;
pub mod config;
pub mod external;
pub mod migration;
pub mod observability;
pub mod telemetry;

// Re-export key types for easy access
pub use actions::{OutcomeReporter, ReportTarget};
pub use config::ModelMoverConfig;
pub use external::{
    AzureCliProber, CommandExecutor, ExistenceVerdict, ProcessCommandExecutor, ResourceProber,
};
pub use migration::{
    MigrationError, MigrationInputs, MigrationOrchestrator, MigrationOutcome, MigrationRequest,
    StepName,
};
pub use telemetry::{generate_correlation_id, init_telemetry};
