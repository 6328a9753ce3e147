use std::collections::{BTreeMap, HashMap};

use crate::common::DomainResult;

use super::catalog::CategoryCatalog;
use super::table::RawTable;
use super::types::{Cell, MapCellRaw, MergedCell, StructureRaw};
use super::validate::{validate_merged_table, MERGED_SCHEMA};

/// The unified per-cell record set, always kept in canonical order:
/// area ascending (cells without an area last), then `x`, then `y`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergedTable {
    cells: Vec<MergedCell>,
}

impl MergedTable {
    pub fn from_cells(mut cells: Vec<MergedCell>) -> Self {
        cells.sort_by_key(canonical_key);
        Self { cells }
    }

    /// Rebuild from a persisted merged artifact.
    pub fn from_raw(table: &RawTable) -> DomainResult<Self> {
        Ok(Self::from_cells(validate_merged_table(table)?))
    }

    pub fn cells(&self) -> &[MergedCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn lookup(&self) -> HashMap<Cell, &MergedCell> {
        self.cells.iter().map(|c| (c.cell, c)).collect()
    }

    /// Rows whose area equals `area`, order preserved.
    pub fn filter_area(&self, area: i64) -> MergedTable {
        Self {
            cells: self
                .cells
                .iter()
                .filter(|c| c.area_id == Some(area))
                .cloned()
                .collect(),
        }
    }

    /// Cells carrying a structure named `name`, in table order.
    pub fn cells_with_category(&self, name: &str) -> Vec<Cell> {
        self.cells
            .iter()
            .filter(|c| c.has_structure() && c.category_name == name)
            .map(|c| c.cell)
            .collect()
    }

    pub fn headers() -> Vec<&'static str> {
        MERGED_SCHEMA.column_names()
    }

    /// Field values in [`MergedTable::headers`] order.
    pub fn to_rows(&self) -> Vec<Vec<Option<String>>> {
        self.cells
            .iter()
            .map(|c| {
                vec![
                    Some(c.cell.x.to_string()),
                    Some(c.cell.y.to_string()),
                    Some(if c.blocked { "1" } else { "0" }.to_string()),
                    c.category_id.map(|id| id.to_string()),
                    Some(c.category_name.clone()),
                    c.area_id.map(|id| id.to_string()),
                ]
            })
            .collect()
    }
}

fn canonical_key(cell: &MergedCell) -> (bool, i64, i64, i64) {
    (
        cell.area_id.is_none(),
        cell.area_id.unwrap_or_default(),
        cell.cell.x,
        cell.cell.y,
    )
}

/// Full outer join of the map and structure records on the cell coordinate.
///
/// A cell present on only one side survives: without a map row it is not
/// blocked, without a structure row its category id and area stay empty and
/// its name resolves to the catalog sentinel. Inputs are expected to be
/// validated, so each cell appears at most once per side.
pub fn merge(
    map: &[MapCellRaw],
    structures: &[StructureRaw],
    catalog: &CategoryCatalog,
) -> MergedTable {
    let mut joined: BTreeMap<Cell, (Option<bool>, Option<&StructureRaw>)> = BTreeMap::new();

    for row in map {
        joined.entry(row.cell).or_default().0 = Some(row.blocked);
    }
    for row in structures {
        joined.entry(row.cell).or_default().1 = Some(row);
    }

    let cells = joined
        .into_iter()
        .map(|(cell, (blocked, structure))| {
            let category_id = structure.map(|s| s.category_id);
            MergedCell {
                cell,
                blocked: blocked.unwrap_or(false),
                category_id,
                category_name: catalog.resolve(category_id).to_string(),
                area_id: structure.map(|s| s.area_id),
            }
        })
        .collect();

    MergedTable::from_cells(cells)
}
