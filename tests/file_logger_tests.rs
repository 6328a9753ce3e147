// fast_log installs a process-wide backend, so this file holds a single test.
use grid_route::adapters::outbound::init_combined_logger;
use tempfile::tempdir;

#[test]
fn test_combined_logger_creates_log_file() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("logs").join("grid-route.log");

    let logger = init_combined_logger(&log_path);
    assert!(log_path.parent().unwrap().is_dir());
    assert!(log_path.exists());
    logger.info("merge finished");
    logger.warn("two origins");
    logger.error("no route");
}
