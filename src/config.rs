use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::external::azure::DEFAULT_AZ_PROGRAM;

pub const CONFIG_FILE_STEM: &str = "model-mover";
pub const ENV_PREFIX: &str = "MODEL_MOVER";

/// Main configuration structure for the model mover
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelMoverConfig {
    /// Azure CLI invocation settings
    pub azure: AzureCliConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AzureCliConfig {
    /// Executable used for every lookup and for the move
    pub program: String,
    /// Upper bound for a single invocation. Unset means wait indefinitely; zero is rejected.
    pub command_timeout_seconds: Option<u64>,
}

impl Default for AzureCliConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_AZ_PROGRAM.to_string(),
            command_timeout_seconds: None,
        }
    }
}

impl AzureCliConfig {
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directives, used when RUST_LOG is unset
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl ModelMoverConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (model-mover.toml) in the working directory
    /// 3. Environment variables (MODEL_MOVER_AZURE__PROGRAM, ...)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`ModelMoverConfig::load`], with the config file looked up in `dir`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        let file = dir.join(format!("{CONFIG_FILE_STEM}.toml"));
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        if config.azure.command_timeout_seconds == Some(0) {
            bail!("azure.command_timeout_seconds must be greater than zero; leave it unset for no timeout");
        }
        Ok(config)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}
