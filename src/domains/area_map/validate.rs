//! Schema and integrity checks for the raw tables.
//!
//! Every table role has a fixed [`TableSchema`]. [`validate`] maps header
//! names onto schema positions, rejects missing or unexpected columns, checks
//! integer typing, nulls and natural-key uniqueness, and yields a
//! [`ValidatedTable`] whose fields are addressed by schema position. The
//! role-specific functions then lift validated rows into typed records and
//! apply the domain checks for that role.

use std::collections::HashMap;

use crate::common::{DomainError, DomainResult};

use super::catalog::CategoryCatalog;
use super::table::RawTable;
use super::types::{CategoryEntry, Cell, MapCellRaw, MergedCell, StructureRaw, TableRole};

pub mod columns {
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const CONSTRUCTION_SITE: &str = "ConstructionSite";
    pub const CATEGORY: &str = "category";
    pub const AREA: &str = "area";
    pub const STRUCT: &str = "struct";
    pub const CATEGORY_NAME: &str = "category_name";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
}

impl ColumnSpec {
    const fn int(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Integer, required: true }
    }

    const fn optional_int(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Integer, required: false }
    }

    const fn text(name: &'static str) -> Self {
        Self { name, kind: ColumnKind::Text, required: true }
    }
}

/// Expected shape of one table role. `key` names the natural-key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub role: TableRole,
    pub columns: &'static [ColumnSpec],
    pub key: &'static [&'static str],
}

impl TableSchema {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }
}

pub const MAP_SCHEMA: TableSchema = TableSchema {
    role: TableRole::Map,
    columns: &[
        ColumnSpec::int(columns::X),
        ColumnSpec::int(columns::Y),
        ColumnSpec::int(columns::CONSTRUCTION_SITE),
    ],
    key: &[columns::X, columns::Y],
};

pub const STRUCTURE_SCHEMA: TableSchema = TableSchema {
    role: TableRole::Structure,
    columns: &[
        ColumnSpec::int(columns::X),
        ColumnSpec::int(columns::Y),
        ColumnSpec::int(columns::CATEGORY),
        ColumnSpec::int(columns::AREA),
    ],
    key: &[columns::X, columns::Y],
};

pub const CATEGORY_SCHEMA: TableSchema = TableSchema {
    role: TableRole::Category,
    columns: &[ColumnSpec::int(columns::CATEGORY), ColumnSpec::text(columns::STRUCT)],
    key: &[columns::CATEGORY],
};

/// Layout of the persisted merged artifact.
pub const MERGED_SCHEMA: TableSchema = TableSchema {
    role: TableRole::Merged,
    columns: &[
        ColumnSpec::int(columns::X),
        ColumnSpec::int(columns::Y),
        ColumnSpec::int(columns::CONSTRUCTION_SITE),
        ColumnSpec::optional_int(columns::CATEGORY),
        ColumnSpec::text(columns::CATEGORY_NAME),
        ColumnSpec::optional_int(columns::AREA),
    ],
    key: &[columns::X, columns::Y],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    pub line: usize,
    values: Vec<Option<FieldValue>>,
}

impl ValidatedRow {
    pub fn int(&self, position: usize) -> Option<i64> {
        match self.values.get(position) {
            Some(Some(FieldValue::Int(v))) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, position: usize) -> Option<&str> {
        match self.values.get(position) {
            Some(Some(FieldValue::Text(v))) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// Rows of a table that passed [`validate`], fields in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTable {
    pub schema: TableSchema,
    pub rows: Vec<ValidatedRow>,
}

impl ValidatedTable {
    pub fn role(&self) -> TableRole {
        self.schema.role
    }

    fn required_int(&self, row: &ValidatedRow, column: &str) -> DomainResult<i64> {
        self.schema
            .position(column)
            .and_then(|p| row.int(p))
            .ok_or_else(|| DomainError::row(self.role(), row.line, format!("missing value for '{}'", column)))
    }

    fn optional_int(&self, row: &ValidatedRow, column: &str) -> Option<i64> {
        self.schema.position(column).and_then(|p| row.int(p))
    }

    fn required_text<'a>(&self, row: &'a ValidatedRow, column: &str) -> DomainResult<&'a str> {
        self.schema
            .position(column)
            .and_then(|p| row.text(p))
            .ok_or_else(|| DomainError::row(self.role(), row.line, format!("missing value for '{}'", column)))
    }

    fn cell(&self, row: &ValidatedRow) -> DomainResult<Cell> {
        let x = self.required_int(row, columns::X)?;
        let y = self.required_int(row, columns::Y)?;
        if x < 0 || y < 0 {
            return Err(DomainError::row(
                self.role(),
                row.line,
                format!("coordinate ({}, {}) is negative", x, y),
            ));
        }
        Ok(Cell::new(x, y))
    }

    fn site_flag(&self, row: &ValidatedRow) -> DomainResult<bool> {
        match self.required_int(row, columns::CONSTRUCTION_SITE)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DomainError::schema(
                self.role(),
                format!(
                    "column '{}' must be 0 or 1, found {} at line {}",
                    columns::CONSTRUCTION_SITE,
                    other,
                    row.line
                ),
            )),
        }
    }
}

/// Check `table` against `schema`. Never mutates the input.
///
/// Order of checks: column set (schema), integer typing (schema), nulls in
/// required columns (row), duplicate natural keys (row).
pub fn validate(table: &RawTable, schema: &TableSchema) -> DomainResult<ValidatedTable> {
    let role = schema.role;
    let positions = column_positions(table, schema)?;

    for (column, &source) in schema.columns.iter().zip(&positions) {
        if column.kind != ColumnKind::Integer {
            continue;
        }
        for row in &table.rows {
            if let Some(value) = &row.fields[source] {
                if value.parse::<i64>().is_err() {
                    return Err(DomainError::schema(
                        role,
                        format!(
                            "column '{}' must hold integers, found '{}' at line {}",
                            column.name, value, row.line
                        ),
                    ));
                }
            }
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut values = Vec::with_capacity(schema.columns.len());
        for (column, &source) in schema.columns.iter().zip(&positions) {
            let value = match &row.fields[source] {
                None if column.required => {
                    return Err(DomainError::row(
                        role,
                        row.line,
                        format!("null value in required column '{}'", column.name),
                    ));
                }
                None => None,
                Some(raw) => Some(match column.kind {
                    ColumnKind::Integer => FieldValue::Int(raw.parse::<i64>().map_err(|_| {
                        DomainError::schema(role, format!("column '{}' must hold integers", column.name))
                    })?),
                    ColumnKind::Text => FieldValue::Text(raw.clone()),
                }),
            };
            values.push(value);
        }
        rows.push(ValidatedRow { line: row.line, values });
    }

    check_unique_keys(schema, &rows)?;

    Ok(ValidatedTable { schema: *schema, rows })
}

fn column_positions(table: &RawTable, schema: &TableSchema) -> DomainResult<Vec<usize>> {
    let role = schema.role;

    for (index, name) in table.headers.iter().enumerate() {
        if table.headers[..index].contains(name) {
            return Err(DomainError::schema(role, format!("column '{}' appears twice", name)));
        }
    }

    let missing: Vec<&str> = schema
        .columns
        .iter()
        .map(|c| c.name)
        .filter(|name| table.column_index(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::schema(role, format!("missing columns: {}", missing.join(", "))));
    }

    let unexpected: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .filter(|name| schema.position(name).is_none())
        .collect();
    if !unexpected.is_empty() {
        return Err(DomainError::schema(
            role,
            format!("unexpected columns: {}", unexpected.join(", ")),
        ));
    }

    Ok(schema
        .columns
        .iter()
        .filter_map(|c| table.column_index(c.name))
        .collect())
}

fn check_unique_keys(schema: &TableSchema, rows: &[ValidatedRow]) -> DomainResult<()> {
    let key_positions: Vec<usize> = schema.key.iter().filter_map(|k| schema.position(k)).collect();
    let mut seen: HashMap<Vec<i64>, usize> = HashMap::with_capacity(rows.len());

    for row in rows {
        let key: Vec<i64> = key_positions.iter().filter_map(|&p| row.int(p)).collect();
        if let Some(first) = seen.insert(key.clone(), row.line) {
            let rendered: Vec<String> = key.iter().map(i64::to_string).collect();
            return Err(DomainError::row(
                schema.role,
                row.line,
                format!(
                    "duplicate key ({}) = ({}), first seen at line {}",
                    schema.key.join(", "),
                    rendered.join(", "),
                    first
                ),
            ));
        }
    }
    Ok(())
}

pub fn validate_map_table(table: &RawTable) -> DomainResult<Vec<MapCellRaw>> {
    let validated = validate(table, &MAP_SCHEMA)?;
    validated
        .rows
        .iter()
        .map(|row| {
            Ok(MapCellRaw {
                cell: validated.cell(row)?,
                blocked: validated.site_flag(row)?,
            })
        })
        .collect()
}

pub fn validate_category_table(table: &RawTable) -> DomainResult<Vec<CategoryEntry>> {
    let validated = validate(table, &CATEGORY_SCHEMA)?;
    validated
        .rows
        .iter()
        .map(|row| {
            Ok(CategoryEntry {
                id: validated.required_int(row, columns::CATEGORY)?,
                name: validated.required_text(row, columns::STRUCT)?.to_string(),
            })
        })
        .collect()
}

/// Structure rows must reference a category the catalog knows (or the reserved id).
pub fn validate_structure_table(
    table: &RawTable,
    catalog: &CategoryCatalog,
) -> DomainResult<Vec<StructureRaw>> {
    let validated = validate(table, &STRUCTURE_SCHEMA)?;
    validated
        .rows
        .iter()
        .map(|row| {
            let category_id = validated.required_int(row, columns::CATEGORY)?;
            if !catalog.accepts(category_id) {
                let known = match catalog.max_id() {
                    Some(max) => format!("catalog ids go up to {}", max),
                    None => "catalog is empty".to_string(),
                };
                return Err(DomainError::schema(
                    TableRole::Structure,
                    format!(
                        "category {} at line {} is not in the catalog ({})",
                        category_id, row.line, known
                    ),
                ));
            }
            Ok(StructureRaw {
                cell: validated.cell(row)?,
                category_id,
                area_id: validated.required_int(row, columns::AREA)?,
            })
        })
        .collect()
}

/// Lift a re-loaded merged artifact back into records.
pub fn validate_merged_table(table: &RawTable) -> DomainResult<Vec<MergedCell>> {
    let validated = validate(table, &MERGED_SCHEMA)?;
    validated
        .rows
        .iter()
        .map(|row| {
            Ok(MergedCell {
                cell: validated.cell(row)?,
                blocked: validated.site_flag(row)?,
                category_id: validated.optional_int(row, columns::CATEGORY),
                category_name: validated.required_text(row, columns::CATEGORY_NAME)?.to_string(),
                area_id: validated.optional_int(row, columns::AREA),
            })
        })
        .collect()
}
