use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::common::{DomainError, DomainResult};

use super::graph::GridGraph;
use super::types::{Cell, GridPath};

/// Breadth-first search from `origin` to the nearest cell of `destinations`.
///
/// Cells are checked against the destination set when dequeued, and
/// neighbours are enqueued in the graph's fixed direction order, so among
/// equidistant destinations the first one reached in that order wins and the
/// result is identical across runs on the same graph.
pub fn shortest_path(
    graph: &GridGraph,
    origin: Cell,
    destinations: &BTreeSet<Cell>,
) -> DomainResult<GridPath> {
    if !graph.contains(origin) {
        return Err(DomainError::path_not_found(format!(
            "origin {} is blocked or not on the map",
            origin
        )));
    }
    if destinations.is_empty() {
        return Err(DomainError::path_not_found("no destination cells given"));
    }

    let mut frontier = VecDeque::from([origin]);
    let mut visited = HashSet::from([origin]);
    let mut previous: HashMap<Cell, Cell> = HashMap::new();

    while let Some(current) = frontier.pop_front() {
        if destinations.contains(&current) {
            return reconstruct(&previous, origin, current);
        }
        for next in graph.neighbors(current) {
            if visited.insert(next) {
                previous.insert(next, current);
                frontier.push_back(next);
            }
        }
    }

    Err(DomainError::path_not_found(format!(
        "none of {} destination cell(s) is reachable from {}",
        destinations.len(),
        origin
    )))
}

fn reconstruct(previous: &HashMap<Cell, Cell>, origin: Cell, found: Cell) -> DomainResult<GridPath> {
    let mut cells = vec![found];
    let mut current = found;
    while current != origin {
        current = *previous.get(&current).ok_or_else(|| {
            DomainError::path_not_found(format!("predecessor chain broken at {}", current))
        })?;
        cells.push(current);
    }
    cells.reverse();
    GridPath::new(cells).ok_or_else(|| DomainError::path_not_found("empty route"))
}
