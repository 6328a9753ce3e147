use grid_route::domains::area_map::*;

/// Merged table from an ASCII grid: '.' open, '#' blocked, ' ' absent. Row index is y, column is x.
fn grid(rows: &[&str]) -> MergedTable {
    let mut map = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let cell = Cell::new(x as i64, y as i64);
            match ch {
                '.' => map.push(MapCellRaw { cell, blocked: false }),
                '#' => map.push(MapCellRaw { cell, blocked: true }),
                _ => {}
            }
        }
    }
    merge(&map, &[], &CategoryCatalog::default())
}

#[test]
fn test_blocked_cells_are_not_nodes() {
    let merged = grid(&["..", "#."]);
    let graph = build_graph(&merged);

    assert_eq!(graph.node_count(), 3);
    assert!(!graph.contains(Cell::new(0, 1)));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_absent_cells_are_not_traversable() {
    let merged = grid(&[". .", "..."]);
    let graph = build_graph(&merged);

    assert!(!graph.contains(Cell::new(1, 0)));
    let around_gap: Vec<Cell> = graph.neighbors(Cell::new(0, 0)).collect();
    assert_eq!(around_gap, vec![Cell::new(0, 1)]);
}

#[test]
fn test_structure_only_cell_is_traversable() {
    let catalog = CategoryCatalog::new(vec![CategoryEntry { id: 3, name: "MyHome".to_string() }]).unwrap();
    let map = vec![MapCellRaw { cell: Cell::new(0, 0), blocked: false }];
    let structures = vec![StructureRaw { cell: Cell::new(1, 0), category_id: 3, area_id: 1 }];
    let graph = build_graph(&merge(&map, &structures, &catalog));

    assert!(graph.contains(Cell::new(1, 0)));
    assert_eq!(graph.neighbors(Cell::new(0, 0)).collect::<Vec<_>>(), vec![Cell::new(1, 0)]);
}

#[test]
fn test_neighbors_come_north_south_east_west() {
    let merged = grid(&["...", "...", "..."]);
    let graph = build_graph(&merged);

    let order: Vec<Cell> = graph.neighbors(Cell::new(1, 1)).collect();
    assert_eq!(
        order,
        vec![Cell::new(1, 0), Cell::new(1, 2), Cell::new(2, 1), Cell::new(0, 1)]
    );
}

#[test]
fn test_adjacency_is_symmetric() {
    let merged = grid(&[
        "..#..#.",
        ".#...#.",
        "... ...",
        "#.#.#..",
        "..... #",
    ]);
    let graph = build_graph(&merged);

    for a in graph.cells() {
        for b in graph.neighbors(a) {
            assert!(graph.neighbors(b).any(|back| back == a), "{} -> {} has no way back", a, b);
        }
    }
}

#[test]
fn test_empty_table_builds_empty_graph() {
    let graph = build_graph(&MergedTable::default());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}
