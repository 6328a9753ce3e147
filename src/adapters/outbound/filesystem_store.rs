use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::{DomainError, DomainResult};
use crate::config::Config;
use crate::domains::area_map::export::{path_headers, path_rows};
use crate::domains::area_map::ports::{ArtifactStore, GridDataSource, MergeOutputs};
use crate::domains::area_map::{
    write_delimited, CategorySummary, MergedTable, PathRow, RawTable, TableRole,
};

/// Reads the input tables and writes the artifacts as delimited files.
/// Every path is fixed at construction from the [`Config`].
#[derive(Debug, Clone)]
pub struct FilesystemTableStore {
    map_table: PathBuf,
    structure_table: PathBuf,
    category_table: PathBuf,
    merged_table: PathBuf,
    area_table: PathBuf,
    path_table: PathBuf,
    summary: Option<PathBuf>,
    delimiter: char,
}

impl FilesystemTableStore {
    pub fn new(config: &Config) -> Self {
        let output_dir = config.output_dir();
        Self {
            map_table: config.table_path(TableRole::Map),
            structure_table: config.table_path(TableRole::Structure),
            category_table: config.table_path(TableRole::Category),
            merged_table: config.table_path(TableRole::Merged),
            area_table: output_dir.join(&config.output.area_table),
            path_table: output_dir.join(&config.output.path_table),
            summary: config.output.summary.as_ref().map(|name| output_dir.join(name)),
            delimiter: config.data.delimiter,
        }
    }

    pub fn merged_table_path(&self) -> &Path {
        &self.merged_table
    }

    fn read_table(&self, role: TableRole, path: &Path) -> DomainResult<RawTable> {
        debug!(table = %role, path = %path.display(), "reading table");
        let text = fs::read_to_string(path).map_err(|e| DomainError::io(path, e))?;
        RawTable::parse(role, &text, self.delimiter)
    }

    fn render_table(&self, headers: &[&str], rows: &[Vec<Option<String>>]) -> Vec<u8> {
        write_delimited(headers, rows, self.delimiter).into_bytes()
    }

    fn write_table(
        &self,
        path: &Path,
        headers: &[&str],
        rows: &[Vec<Option<String>>],
    ) -> DomainResult<PathBuf> {
        write_atomic(path, &self.render_table(headers, rows))?;
        debug!(path = %path.display(), rows = rows.len(), "wrote table");
        Ok(path.to_path_buf())
    }
}

/// A fully written sibling temp file waiting to be renamed over its target.
struct Staged {
    tmp: PathBuf,
    target: PathBuf,
}

fn stage(path: &Path, bytes: &[u8]) -> DomainResult<Staged> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DomainError::io(parent, e))?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DomainError::io(&tmp, e)
    })?;
    Ok(Staged { tmp, target: path.to_path_buf() })
}

/// Stage every file first and rename only once all of them are on disk, so a
/// failed write leaves the previous artifacts in place.
fn write_all_atomic(files: &[(&Path, Vec<u8>)]) -> DomainResult<()> {
    let mut staged = Vec::with_capacity(files.len());
    for (path, bytes) in files {
        match stage(path, bytes) {
            Ok(file) => staged.push(file),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }
    for (index, file) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(&file.tmp, &file.target) {
            discard(&staged[index..]);
            return Err(DomainError::io(&file.target, e));
        }
    }
    Ok(())
}

fn discard(staged: &[Staged]) {
    for file in staged {
        let _ = fs::remove_file(&file.tmp);
    }
}

/// Write to a sibling temp file and rename it over `path`, so readers never
/// see a half-written artifact.
fn write_atomic(path: &Path, bytes: &[u8]) -> DomainResult<()> {
    write_all_atomic(&[(path, bytes.to_vec())])
}

impl GridDataSource for FilesystemTableStore {
    fn load_table(&self, role: TableRole) -> DomainResult<RawTable> {
        let path = match role {
            TableRole::Map => &self.map_table,
            TableRole::Structure => &self.structure_table,
            TableRole::Category => &self.category_table,
            TableRole::Merged => &self.merged_table,
        };
        self.read_table(role, path)
    }
}

impl ArtifactStore for FilesystemTableStore {
    fn save_merge_outputs(
        &self,
        merged: &MergedTable,
        area: Option<&MergedTable>,
        summary: &CategorySummary,
    ) -> DomainResult<MergeOutputs> {
        let headers = MergedTable::headers();
        let mut files = vec![(
            self.merged_table.as_path(),
            self.render_table(&headers, &merged.to_rows()),
        )];
        if let Some(subset) = area {
            files.push((self.area_table.as_path(), self.render_table(&headers, &subset.to_rows())));
        }
        if let Some(path) = &self.summary {
            files.push((path.as_path(), serde_json::to_vec_pretty(summary)?));
        }
        write_all_atomic(&files)?;
        debug!(files = files.len(), "wrote merge outputs");

        Ok(MergeOutputs {
            merged: self.merged_table.clone(),
            area: area.map(|_| self.area_table.clone()),
            summary: self.summary.clone(),
        })
    }

    fn load_merged(&self) -> DomainResult<MergedTable> {
        let raw = self.read_table(TableRole::Merged, &self.merged_table)?;
        MergedTable::from_raw(&raw)
    }

    fn save_path(&self, rows: &[PathRow]) -> DomainResult<PathBuf> {
        self.write_table(&self.path_table, &path_headers(), &path_rows(rows))
    }
}
