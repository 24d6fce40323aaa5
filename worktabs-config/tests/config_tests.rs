//! Integration tests for worktabs-config file I/O.

use tempfile::TempDir;
use worktabs_config::{Config, ConfigError, LogLevel};

#[test]
fn save_then_load_preserves_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("config.yaml");

    let config = Config {
        home_label: "Home".to_string(),
        always_tabbed_roles: vec!["admin".to_string(), "dispatcher".to_string()],
        log_level: LogLevel::Debug,
        ..Config::default()
    };
    config.save_to(&path).expect("save should succeed");

    let loaded = Config::load_from(&path).expect("load should succeed");
    assert_eq!(loaded, config);
    assert!(
        !path.with_extension("yaml.tmp").exists(),
        "temp file should be renamed away"
    );
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "home_label: Start\nlog_level: info\n").unwrap();

    let loaded = Config::load_from(&path).expect("load should succeed");
    assert_eq!(loaded.home_label, "Start");
    assert_eq!(loaded.home_path, "/");
    assert_eq!(loaded.log_level, LogLevel::Info);
    assert_eq!(loaded.always_tabbed_roles, vec!["admin".to_string()]);
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "excluded_paths: [unterminated\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn semantic_problems_are_validation_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    std::fs::write(&path, "home_path: dashboard\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got {err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = Config::load_from(&temp_dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
