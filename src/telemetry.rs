use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::{LogFormat, ObservabilityConfig};

/// Initialize structured logging.
///
/// Logs go to stderr so stdout only carries the outcome text. `RUST_LOG`
/// overrides the configured level when set.
pub fn init_telemetry(observability: &ObservabilityConfig) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::try_new(&observability.log_level)?,
    };

    match observability.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()?,
    }

    tracing::debug!("Model mover telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one run
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}
