use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domains::area_map::types::TableRole;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Schema error in {table} table: {reason}")]
    Schema { table: TableRole, reason: String },

    #[error("Row error in {table} table at line {line}: {reason}")]
    Row {
        table: TableRole,
        line: usize,
        reason: String,
    },

    #[error("Path not found: {reason}")]
    PathNotFound { reason: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    pub fn schema(table: TableRole, reason: impl Into<String>) -> Self {
        DomainError::Schema { table, reason: reason.into() }
    }

    pub fn row(table: TableRole, line: usize, reason: impl Into<String>) -> Self {
        DomainError::Row { table, line, reason: reason.into() }
    }

    pub fn path_not_found(reason: impl Into<String>) -> Self {
        DomainError::PathNotFound { reason: reason.into() }
    }

    /// Classify an I/O failure so missing files and permission problems get their own message.
    pub fn io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => DomainError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => DomainError::PermissionDenied { path },
            _ => DomainError::Io { path, source },
        }
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
