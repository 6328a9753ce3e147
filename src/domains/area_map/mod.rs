pub mod catalog;
pub mod export;
pub mod graph;
pub mod merge;
pub mod pathfinder;
pub mod ports;
pub mod summary;
pub mod table;
pub mod types;
pub mod validate;

pub use catalog::*;
pub use export::*;
pub use graph::*;
pub use merge::*;
pub use pathfinder::*;
pub use ports::*;
pub use summary::*;
pub use table::*;
pub use types::*;
pub use validate::{
    validate, validate_category_table, validate_map_table, validate_merged_table,
    validate_structure_table, ColumnKind, ColumnSpec, TableSchema, ValidatedTable,
    CATEGORY_SCHEMA, MAP_SCHEMA, MERGED_SCHEMA, STRUCTURE_SCHEMA,
};
