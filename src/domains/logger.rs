use std::sync::Arc;

/// Stage-level progress port injected into the application services.
/// Non-fallible from the caller's perspective; adapters live in
/// `adapters::outbound`.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;
