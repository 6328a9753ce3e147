use serde::{Deserialize, Serialize};
use std::fmt;

/// One grid coordinate. Ordered by `x` then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis moves on the grid. `y` grows downwards, so North is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed expansion order; it decides which equal-length route wins.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRole {
    Map,
    Structure,
    Category,
    Merged,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableRole::Map => "map",
            TableRole::Structure => "structure",
            TableRole::Category => "category",
            TableRole::Merged => "merged",
        };
        f.write_str(name)
    }
}

/// A row of the map table: whether the cell is a construction site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCellRaw {
    pub cell: Cell,
    pub blocked: bool,
}

/// A row of the structure table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRaw {
    pub cell: Cell,
    pub category_id: i64,
    pub area_id: i64,
}

/// A row of the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: i64,
    pub name: String,
}

/// Unified per-cell record produced by the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCell {
    pub cell: Cell,
    pub blocked: bool,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub area_id: Option<i64>,
}

impl MergedCell {
    /// True when the cell carried a structure record.
    pub fn has_structure(&self) -> bool {
        self.category_id.is_some()
    }
}

/// Non-empty ordered route: origin first, reached destination last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPath {
    cells: Vec<Cell>,
}

impl GridPath {
    /// Returns `None` for an empty sequence.
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn origin(&self) -> Cell {
        self.cells[0]
    }

    pub fn destination(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves, i.e. edges between consecutive cells.
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }
}

/// One row of the exported route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRow {
    pub cell: Cell,
    pub category_name: Option<String>,
}
