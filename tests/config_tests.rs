use grid_route::config::{DATA_DIR_ENV, ENV_PREFIX};
use grid_route::domains::area_map::TableRole;
use grid_route::Config;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::tempdir;

// Tests in this file share the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for (key, _) in env::vars() {
        if key.starts_with(ENV_PREFIX) {
            env::remove_var(key);
        }
    }
    guard
}

const OVERRIDES: &str = r#"
[data]
delimiter = ";"

[route]
origin_category = "Apartment"
area = 2
"#;

#[test]
fn test_from_file_reads_toml_overrides() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    fs::write(&path, OVERRIDES).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.data.delimiter, ';');
    assert_eq!(config.route.origin_category, "Apartment");
    assert_eq!(config.route.area, Some(2));
    // untouched sections keep their defaults
    assert_eq!(config.route.destination_category, "BandalgomCoffee");
    assert_eq!(config.output.merged_table, "area_merged.csv");
}

#[test]
fn test_load_without_file_gives_defaults() {
    let _env = lock_env();
    let config = Config::load(None).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_layers_file_over_defaults() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    fs::write(&path, OVERRIDES).unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.data.delimiter, ';');
    assert_eq!(config.route.origin_category, "Apartment");
    assert_eq!(config.data.map_table, "area_map.csv");
}

#[test]
fn test_environment_overrides_file() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    fs::write(&path, OVERRIDES).unwrap();

    env::set_var("GRID_ROUTE__ROUTE__AREA", "3");
    env::set_var("GRID_ROUTE__ROUTE__DESTINATION_CATEGORY", "Building");
    let loaded = Config::load(Some(path.as_path()));
    env::remove_var("GRID_ROUTE__ROUTE__AREA");
    env::remove_var("GRID_ROUTE__ROUTE__DESTINATION_CATEGORY");

    let config = loaded.unwrap();
    assert_eq!(config.route.area, Some(3));
    assert_eq!(config.route.destination_category, "Building");
    assert_eq!(config.route.origin_category, "Apartment");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let _env = lock_env();
    let dir = tempdir().unwrap();
    assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    assert!(Config::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_data_dir_precedence() {
    let _env = lock_env();
    let dir = tempdir().unwrap();

    env::set_var(DATA_DIR_ENV, dir.path());
    let from_env = Config::default().data_dir();
    let explicit = Config::with_base_dir("elsewhere").data_dir();
    env::remove_var(DATA_DIR_ENV);

    assert_eq!(from_env, dir.path());
    assert_eq!(explicit, PathBuf::from("elsewhere"));
    // integration tests run from the package root, which ships the sample tables
    assert_eq!(Config::default().data_dir(), PathBuf::from("resources/area_map"));
}

#[test]
fn test_output_dir_defaults_to_data_dir() {
    let _env = lock_env();
    let mut config = Config::with_base_dir("inputs");
    assert_eq!(config.output_dir(), PathBuf::from("inputs"));
    assert_eq!(
        config.table_path(TableRole::Merged),
        PathBuf::from("inputs/area_merged.csv")
    );

    config.output.dir = Some(PathBuf::from("out"));
    assert_eq!(
        config.table_path(TableRole::Merged),
        PathBuf::from("out/area_merged.csv")
    );
    assert_eq!(
        config.table_path(TableRole::Map),
        PathBuf::from("inputs/area_map.csv")
    );
}
