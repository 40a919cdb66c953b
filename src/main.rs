use anyhow::Result;
use clap::Parser;

use model_mover::cli::commands::{azure_prober, Command, MigrateCommand, ProbeCommand};
use model_mover::cli::{Cli, Commands};
use model_mover::{init_telemetry, MigrationInputs, ModelMoverConfig};

fn main() -> Result<()> {
    // .env may carry INPUT_* values, so it is loaded before argument parsing
    ModelMoverConfig::load_env_file()?;
    let cli = Cli::parse();

    let config = ModelMoverConfig::load()?;
    init_telemetry(&config.observability)?;
    let prober = azure_prober(&config.azure);

    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(async {
        match cli.command {
            None => {
                MigrateCommand::new(MigrationInputs::from(&cli.migration), prober)
                    .with_dry_run(cli.migration.dry_run)
                    .execute()
                    .await
            }
            Some(Commands::Probe { json, target }) => {
                ProbeCommand::new(target, prober)
                    .with_json(json)
                    .execute()
                    .await
            }
        }
    })?;
    drop(runtime);

    std::process::exit(code);
}
