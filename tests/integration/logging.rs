//! File logging.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_FILE_PATH: when using file mode, the path of the log file
//!   Refer to `src/logging/mod.rs` for more details.
use chrono::Utc;
use microstellar::logging::{compute_rolled_file_path, setup_logging, LoggingError};
use serial_test::serial;
use std::{env, path::Path, thread, time::Duration};

// The global logger can be installed once per process, so installation and the
// second-install failure are checked in one test.
#[test]
#[serial]
fn test_setup_logging_file_mode_creates_log_file() {
    let temp_log_dir = tempfile::tempdir().unwrap();
    let base = temp_log_dir
        .path()
        .join("nested/test_microstellar.log")
        .to_string_lossy()
        .to_string();

    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FILE_PATH", &base);

    setup_logging().expect("first logger install");
    log::info!("hello from the integration test");
    thread::sleep(Duration::from_millis(200));

    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let expected_path = compute_rolled_file_path(&base, &date_str);
    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {} does not exist",
        expected_path
    );

    assert!(matches!(setup_logging(), Err(LoggingError::Init(_))));

    env::remove_var("LOG_MODE");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_FILE_PATH");
}
