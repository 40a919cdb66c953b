use std::time::Instant;
use tracing::info;

/// Span covering one migration run
pub fn create_migration_span(
    model_name: Option<&str>,
    model_version: Option<&str>,
    correlation_id: &str,
) -> tracing::Span {
    tracing::info_span!(
        "migration",
        model.name = model_name,
        model.version = model_version,
        correlation.id = correlation_id,
        otel.kind = "internal"
    )
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}
