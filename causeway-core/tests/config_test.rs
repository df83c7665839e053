//! Tests for the Causeway configuration system.

use std::sync::Mutex;

use causeway_core::config::{CausewayConfig, ConfigOverrides};
use causeway_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all CAUSEWAY_ env vars and point HOME at an empty directory so a
/// developer's own user config never leaks into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "CAUSEWAY_MAX_PATHS",
        "CAUSEWAY_MAX_PATH_LENGTH",
        "CAUSEWAY_SIGMA",
        "CAUSEWAY_LOSS_OF_FUNCTION",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("causeway.toml"),
        r#"
[checker]
max_paths = 3
max_path_length = 8

[scoring]
sigma = 0.3
"#,
    )
    .unwrap();

    std::env::set_var("CAUSEWAY_MAX_PATH_LENGTH", "6");
    let overrides = ConfigOverrides {
        max_paths: Some(10),
        ..Default::default()
    };

    let config = CausewayConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Override beats project file.
    assert_eq!(config.checker.effective_max_paths(), 10);
    // Env beats project file.
    assert_eq!(config.checker.effective_max_path_length(), 6);
    // Project file beats defaults.
    assert_eq!(config.scoring.effective_sigma(), 0.3);

    isolate_env(home.path());
}

#[test]
fn test_user_config_is_lowest_file_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".causeway");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[checker]\nmax_paths = 4\nmax_path_length = 9\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(dir.path().join("causeway.toml"), "[checker]\nmax_paths = 2\n").unwrap();

    let config = CausewayConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.checker.effective_max_paths(), 2);
    assert_eq!(config.checker.effective_max_path_length(), 9);
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = CausewayConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.checker.effective_max_paths(), 1);
    assert_eq!(config.checker.effective_max_path_length(), 5);
    assert!(config.checker.effective_prune_dangling_negatives());
    assert!(config.pruning.effective_remove_mutual_redundancy());
    assert_eq!(config.scoring.effective_sigma(), 0.15);
    assert!(!config.scoring.effective_loss_of_function());
    assert!(!config.scoring.effective_include_final_node());
}

#[test]
fn test_invalid_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("CAUSEWAY_MAX_PATHS", "many");
    let dir = tempdir();
    let config = CausewayConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.checker.max_paths, None);

    isolate_env(home.path());
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("causeway.toml"), "[checker\nmax_paths = ").unwrap();

    match CausewayConfig::load(dir.path(), None).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("causeway.toml")),
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_invalid_sigma_rejected() {
    match CausewayConfig::from_toml("[scoring]\nsigma = 0.0\n").unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "scoring.sigma"),
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_zero_max_path_length_rejected() {
    match CausewayConfig::from_toml("[checker]\nmax_path_length = 0\n").unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "checker.max_path_length")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_pruning_parameters_round_trip() {
    let config = CausewayConfig::from_toml(
        r#"
[pruning]
degrade_bind_positive = false
parameters = ["kf_bind", "kr_bind"]
"#,
    )
    .unwrap();
    assert!(!config.pruning.effective_degrade_bind_positive());
    assert!(config.pruning.effective_subject_object_coherence());

    let reparsed = CausewayConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(reparsed.pruning.parameters, vec!["kf_bind", "kr_bind"]);
    assert_eq!(reparsed.pruning.degrade_bind_positive, Some(false));
}
