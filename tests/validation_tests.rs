use grid_route::common::DomainError;
use grid_route::domains::area_map::*;

fn table(role: TableRole, text: &str) -> RawTable {
    RawTable::parse(role, text, ',').unwrap()
}

fn catalog() -> CategoryCatalog {
    let raw = table(
        TableRole::Category,
        "category, struct\n1, Apartment\n2, Building\n3, MyHome\n4, BandalgomCoffee\n",
    );
    CategoryCatalog::new(validate_category_table(&raw).unwrap()).unwrap()
}

#[test]
fn test_category_table_trims_names() {
    let raw = table(TableRole::Category, "category , struct \n3,  MyHome \n");
    let entries = validate_category_table(&raw).unwrap();
    assert_eq!(entries, vec![CategoryEntry { id: 3, name: "MyHome".to_string() }]);
}

#[test]
fn test_map_table_reads_site_flags() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite\n1,1,0\n1,2,1\n");
    let cells = validate_map_table(&raw).unwrap();
    assert_eq!(cells.len(), 2);
    assert!(!cells[0].blocked);
    assert!(cells[1].blocked);
    assert_eq!(cells[1].cell, Cell::new(1, 2));
}

#[test]
fn test_columns_may_come_in_any_order() {
    let raw = table(TableRole::Structure, "area,category,y,x\n1,3,2,5\n");
    let rows = validate_structure_table(&raw, &catalog()).unwrap();
    assert_eq!(rows[0].cell, Cell::new(5, 2));
    assert_eq!(rows[0].category_id, 3);
    assert_eq!(rows[0].area_id, 1);
}

#[test]
fn test_missing_column_is_schema_error() {
    let raw = table(TableRole::Map, "x,y\n1,1\n");
    match validate_map_table(&raw).unwrap_err() {
        DomainError::Schema { table, reason } => {
            assert_eq!(table, TableRole::Map);
            assert!(reason.contains("ConstructionSite"));
        }
        other => panic!("Expected Schema error, got {:?}", other),
    }
}

#[test]
fn test_extra_column_is_schema_error() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite,note\n1,1,0,hi\n");
    match validate_map_table(&raw).unwrap_err() {
        DomainError::Schema { reason, .. } => assert!(reason.contains("note")),
        other => panic!("Expected Schema error, got {:?}", other),
    }
}

#[test]
fn test_non_integer_value_is_schema_error() {
    let raw = table(TableRole::Structure, "x,y,category,area\n1,1,three,1\n");
    let err = validate_structure_table(&raw, &catalog()).unwrap_err();
    assert!(matches!(err, DomainError::Schema { table: TableRole::Structure, .. }));
}

#[test]
fn test_null_in_required_column_is_row_error() {
    let raw = table(TableRole::Structure, "x,y,category,area\n1,1,3,1\n2,2,,1\n");
    match validate_structure_table(&raw, &catalog()).unwrap_err() {
        DomainError::Row { table, line, reason } => {
            assert_eq!(table, TableRole::Structure);
            assert_eq!(line, 3);
            assert!(reason.contains("category"));
        }
        other => panic!("Expected Row error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_structure_coordinate_is_row_error() {
    let raw = table(TableRole::Structure, "x,y,category,area\n1,1,3,1\n2,2,4,1\n1,1,4,1\n");
    match validate_structure_table(&raw, &catalog()).unwrap_err() {
        DomainError::Row { line, reason, .. } => {
            assert_eq!(line, 4);
            assert!(reason.contains("first seen at line 2"));
        }
        other => panic!("Expected Row error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_map_coordinate_is_row_error() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite\n1,1,0\n1,1,1\n");
    assert!(matches!(validate_map_table(&raw).unwrap_err(), DomainError::Row { .. }));
}

#[test]
fn test_duplicate_category_id_is_row_error() {
    let raw = table(TableRole::Category, "category,struct\n1,Apartment\n1,Building\n");
    assert!(matches!(
        validate_category_table(&raw).unwrap_err(),
        DomainError::Row { table: TableRole::Category, .. }
    ));
}

#[test]
fn test_unknown_category_is_schema_error() {
    let raw = table(TableRole::Structure, "x,y,category,area\n1,1,7,1\n");
    match validate_structure_table(&raw, &catalog()).unwrap_err() {
        DomainError::Schema { table, reason } => {
            assert_eq!(table, TableRole::Structure);
            assert!(reason.contains("category 7"));
            assert!(reason.contains("up to 4"));
        }
        other => panic!("Expected Schema error, got {:?}", other),
    }
}

#[test]
fn test_reserved_category_is_accepted() {
    let raw = table(TableRole::Structure, "x,y,category,area\n1,1,0,1\n");
    let rows = validate_structure_table(&raw, &catalog()).unwrap();
    assert_eq!(rows[0].category_id, 0);
}

#[test]
fn test_site_flag_outside_zero_one_is_rejected() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite\n1,1,2\n");
    assert!(matches!(validate_map_table(&raw).unwrap_err(), DomainError::Schema { .. }));
}

#[test]
fn test_negative_coordinate_is_row_error() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite\n-1,1,0\n");
    assert!(matches!(validate_map_table(&raw).unwrap_err(), DomainError::Row { line: 2, .. }));
}

#[test]
fn test_validate_does_not_touch_input() {
    let raw = table(TableRole::Map, "x,y,ConstructionSite\n1,1,0\n1,1,0\n");
    let before = raw.clone();
    let _ = validate(&raw, &MAP_SCHEMA);
    assert_eq!(raw, before);
}
