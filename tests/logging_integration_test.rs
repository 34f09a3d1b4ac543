//! Integration tests for logging functionality

use fairwatt::config::{load_config, LoggingConfig};
use fairwatt::logging::init_logging;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_logging_rotation_types() {
    for (rotation, accepted) in [("daily", true), ("hourly", true), ("never", true), ("size", false)] {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "mode = \"debug\"\n[logging]\nlocal_rotation = \"{rotation}\"\n"
        )
        .unwrap();
        file.flush().unwrap();

        assert_eq!(load_config(file.path()).is_ok(), accepted, "rotation {rotation}");
    }
}

#[test]
fn test_invalid_level_rejected_before_init() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}

// Only one subscriber can be installed per process; this is the only test
// in this binary that installs one.
#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("info", &config).expect("Failed to initialize logging");
    fairwatt::log_export_written!("exports/meters_2025-03-10.csv", 2);
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("fairwatt.log").exists());
}
