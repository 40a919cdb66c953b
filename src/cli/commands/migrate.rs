use anyhow::Result;
use std::sync::Arc;

use crate::actions::{OutcomeReporter, ReportTarget};
use crate::cli::commands::Command;
use crate::external::ResourceProber;
use crate::migration::{MigrationInputs, MigrationOrchestrator};

pub struct MigrateCommand {
    inputs: MigrationInputs,
    prober: Arc<dyn ResourceProber>,
    dry_run: bool,
    target: ReportTarget,
}

impl MigrateCommand {
    pub fn new(inputs: MigrationInputs, prober: Arc<dyn ResourceProber>) -> Self {
        Self {
            inputs,
            prober,
            dry_run: false,
            target: ReportTarget::detect(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Command for MigrateCommand {
    async fn execute(&self) -> Result<i32> {
        let outcome = MigrationOrchestrator::new(self.prober.clone())
            .with_dry_run(self.dry_run)
            .run(&self.inputs)
            .await;

        let code = OutcomeReporter::new(self.target).report(
            &outcome,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )?;
        Ok(code)
    }
}
