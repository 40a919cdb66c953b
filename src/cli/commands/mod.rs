use anyhow::Result;
use std::sync::Arc;

use crate::config::AzureCliConfig;
use crate::external::{AzureCliProber, ProcessCommandExecutor, ResourceProber};

pub mod migrate;
pub mod probe;

pub use migrate::MigrateCommand;
pub use probe::ProbeCommand;

/// A CLI command. Returns the process exit code.
#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<i32>;
}

/// Build the real Azure CLI prober from configuration.
pub fn azure_prober(config: &AzureCliConfig) -> Arc<dyn ResourceProber> {
    let executor = ProcessCommandExecutor::new().with_timeout(config.command_timeout());
    Arc::new(AzureCliProber::new(Arc::new(executor)).with_program(&config.program))
}
