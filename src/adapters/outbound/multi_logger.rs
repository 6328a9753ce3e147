use crate::domains::logger::{DomainLogger, DynLogger};
use std::path::Path;
use std::sync::Arc;

/// Fans each message out to a primary logger and an optional secondary one.
pub struct MultiLogger {
    primary: DynLogger,
    secondary: Option<DynLogger>,
}

impl MultiLogger {
    pub fn new(primary: DynLogger, secondary: Option<DynLogger>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// File logger first, tracing as the secondary sink. Falls back to tracing
/// alone when the file logger cannot be installed.
pub fn init_combined_logger(path: &Path) -> DynLogger {
    let tracing_logger = super::init_tracing_logger();
    match super::file_logger::init_file_logger(path) {
        Ok(file_logger) => Arc::new(MultiLogger::new(file_logger, Some(tracing_logger))),
        Err(reason) => {
            tracing_logger.warn(&format!("file logging disabled: {}", reason));
            tracing_logger
        }
    }
}
