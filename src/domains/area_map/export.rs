use super::merge::MergedTable;
use super::types::{GridPath, PathRow};
use super::validate::columns;

/// Join each route cell back to its category name, keeping route order.
pub fn export_path(merged: &MergedTable, path: &GridPath) -> Vec<PathRow> {
    let lookup = merged.lookup();
    path.cells()
        .iter()
        .map(|cell| PathRow {
            cell: *cell,
            category_name: lookup.get(cell).map(|record| record.category_name.clone()),
        })
        .collect()
}

pub fn path_headers() -> Vec<&'static str> {
    vec![columns::X, columns::Y, columns::CATEGORY_NAME]
}

pub fn path_rows(rows: &[PathRow]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| {
            vec![
                Some(row.cell.x.to_string()),
                Some(row.cell.y.to_string()),
                row.category_name.clone(),
            ]
        })
        .collect()
}
