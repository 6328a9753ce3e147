use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards domain messages to `tracing`, so they follow the subscriber's filter.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) { tracing::info!(target: "grid_route::stage", "{}", msg); }
    fn warn(&self, msg: &str) { tracing::warn!(target: "grid_route::stage", "{}", msg); }
    fn error(&self, msg: &str) { tracing::error!(target: "grid_route::stage", "{}", msg); }
}

/// Default logger for the CLI when no log file is configured.
pub fn init_tracing_logger() -> DynLogger {
    Arc::new(TracingBridge)
}
