use std::path::PathBuf;

use crate::common::DomainResult;

use super::merge::MergedTable;
use super::summary::CategorySummary;
use super::table::RawTable;
use super::types::{PathRow, TableRole};

/// Port the pipeline reads its raw input tables through.
/// Implementations (adapters) provide filesystem or in-memory sources.
pub trait GridDataSource: Send + Sync {
    /// Load the raw table for `role` (map, structure or category).
    fn load_table(&self, role: TableRole) -> DomainResult<RawTable>;
}

/// Where the merge stage wrote its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutputs {
    pub merged: PathBuf,
    pub area: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

/// Port for the artifacts the pipeline produces. Every artifact must be
/// re-loadable on its own, since the renderer runs as a separate consumer.
pub trait ArtifactStore: Send + Sync {
    /// Persist the merged table, its optional area subset and the category
    /// report together: either all of them are replaced or none is.
    fn save_merge_outputs(
        &self,
        merged: &MergedTable,
        area: Option<&MergedTable>,
        summary: &CategorySummary,
    ) -> DomainResult<MergeOutputs>;
    /// Load the merged table previously persisted.
    fn load_merged(&self) -> DomainResult<MergedTable>;
    /// Persist the route rows in traversal order.
    fn save_path(&self, rows: &[PathRow]) -> DomainResult<PathBuf>;
}
