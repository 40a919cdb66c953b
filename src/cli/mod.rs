use clap::{Args, Parser, Subcommand};

use crate::migration::MigrationInputs;

pub mod commands;

#[derive(Parser)]
#[command(name = "model-mover")]
#[command(version)]
#[command(about = "Share an Azure ML model version from a workspace into a registry")]
#[command(long_about = "Checks that the source resource group, destination resource group, source workspace \
                       and destination registry exist, then shares the model version into the registry. \
                       Every input can also be supplied through the INPUT_* environment variables set by \
                       a GitHub Actions runner.")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub migration: MigrationArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MigrationArgs {
    /// Presence alone turns on the model-in-workspace check
    #[arg(long, env = "INPUT_SOURCE_REGISTRY_NAME", help = "Source registry name (enables the model existence check)")]
    pub source_registry_name: Option<String>,
    #[arg(long, env = "INPUT_SOURCE_WORKSPACE_NAME", help = "Workspace the model currently lives in")]
    pub source_workspace_name: Option<String>,
    #[arg(long, env = "INPUT_SOURCE_RESOURCE_GROUP", help = "Resource group of the source workspace")]
    pub source_resource_group: Option<String>,
    #[arg(long, env = "INPUT_DESTINATION_RESOURCE_GROUP", help = "Destination resource group")]
    pub destination_resource_group: Option<String>,
    #[arg(long, env = "INPUT_DESTINATION_REGISTRY_NAME", help = "Registry the model is shared into")]
    pub destination_registry_name: Option<String>,
    #[arg(
        long,
        env = "INPUT_DESTINATION_REGISTRY_RESOURCE_GROUP",
        help = "Resource group the destination registry is looked up in"
    )]
    pub destination_registry_resource_group: Option<String>,
    #[arg(long, env = "INPUT_MODEL_NAME", help = "Name of the model to move")]
    pub model_name: Option<String>,
    #[arg(long, env = "INPUT_MODEL_VERSION", help = "Version of the model to move")]
    pub model_version: Option<String>,
    /// Run every check but skip the move
    #[arg(long, help = "Run every precondition check without moving the model")]
    pub dry_run: bool,
}

impl From<&MigrationArgs> for MigrationInputs {
    fn from(args: &MigrationArgs) -> Self {
        Self {
            source_registry_name: args.source_registry_name.clone(),
            source_workspace_name: args.source_workspace_name.clone(),
            source_resource_group: args.source_resource_group.clone(),
            destination_resource_group: args.destination_resource_group.clone(),
            destination_registry_name: args.destination_registry_name.clone(),
            destination_registry_resource_group: args.destination_registry_resource_group.clone(),
            model_name: args.model_name.clone(),
            model_version: args.model_version.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a single resource exists, without moving anything
    Probe {
        /// Print the verdict as JSON
        #[arg(long, help = "Print the verdict as JSON instead of text")]
        json: bool,
        #[command(subcommand)]
        target: ProbeTarget,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// Look up a resource group
    ResourceGroup {
        #[arg(long)]
        name: String,
    },
    /// Look up a workspace within a resource group
    Workspace {
        #[arg(long)]
        name: String,
        #[arg(long)]
        resource_group: String,
    },
    /// Look up a registry within a resource group
    Registry {
        #[arg(long)]
        name: String,
        #[arg(long)]
        resource_group: String,
    },
    /// Look up a model version in a workspace or a registry
    Model {
        #[arg(long)]
        name: String,
        #[arg(long)]
        version: String,
        #[arg(long)]
        resource_group: String,
        #[arg(long, conflicts_with = "registry_name", required_unless_present = "registry_name")]
        workspace_name: Option<String>,
        #[arg(long)]
        registry_name: Option<String>,
    },
}
