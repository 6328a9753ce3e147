use petgraph::graphmap::UnGraphMap;

use super::merge::MergedTable;
use super::types::{Cell, Direction};

/// 4-connected adjacency over the traversable (non-blocked) cells.
///
/// Backed by an undirected graph map, so adjacency is symmetric by
/// construction. Neighbours are always reported in [`Direction::ALL`] order.
#[derive(Debug, Clone)]
pub struct GridGraph {
    inner: UnGraphMap<Cell, ()>,
}

impl GridGraph {
    pub fn contains(&self, cell: Cell) -> bool {
        self.inner.contains_node(cell)
    }

    /// Adjacent traversable cells: North, South, East, West.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| cell.step(direction))
            .filter(move |next| self.inner.contains_edge(cell, *next))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.inner.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

/// Build the traversal graph. Blocked cells and cells missing from the table
/// never become nodes.
pub fn build_graph(merged: &MergedTable) -> GridGraph {
    let mut inner: UnGraphMap<Cell, ()> = UnGraphMap::new();

    for record in merged.cells().iter().filter(|c| !c.blocked) {
        inner.add_node(record.cell);
    }

    let traversable: Vec<Cell> = inner.nodes().collect();
    for cell in traversable {
        // South and East cover every axis pair exactly once.
        for direction in [Direction::South, Direction::East] {
            let next = cell.step(direction);
            if next != cell && inner.contains_node(next) {
                inner.add_edge(cell, next, ());
            }
        }
    }

    GridGraph { inner }
}
