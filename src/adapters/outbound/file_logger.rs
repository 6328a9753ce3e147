use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::domains::logger::{DomainLogger, DynLogger};

/// Writes through the `log` facade, which `fast_log` routes to the log file.
struct FastLogBridge;

impl DomainLogger for FastLogBridge {
    fn info(&self, msg: &str) {
        log::info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Install `fast_log` as the global `log` backend appending to `path`.
/// Only one backend can be installed per process; later calls fail.
pub fn init_file_logger(path: &Path) -> Result<DynLogger, String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create log directory {}: {}", parent.display(), e))?;
    }
    fast_log::init(
        fast_log::config::Config::new()
            .file(&path.to_string_lossy())
            .level(log::LevelFilter::Info),
    )
    .map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FastLogBridge))
}
