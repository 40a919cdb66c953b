//! External tool abstractions
//!
//! Trait-based abstractions over the Azure CLI, so the migration pipeline can be
//! exercised with scripted executors and mock probers instead of real `az` calls.

pub mod azure;
pub mod command;

pub use azure::{
    AzureCliProber, AzureCommand, ExistenceVerdict, ModelScope, ResourceIdentity, ResourceKind,
    ResourceProber,
};
pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
