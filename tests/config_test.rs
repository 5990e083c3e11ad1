//! Integration tests for Settings loading.
//!
//! These tests pass an explicit config file path, so they do not depend on
//! the user's global config. They assume no `KFC_*` variables are set; the
//! environment layer is covered in `config_env_test.rs`.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use kfc_data::application::ApplicationError;
use kfc_data::config::Settings;
use kfc_data::domain::LogLevel;

#[test]
fn given_missing_config_file_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(&dir.path().join("kfc.toml"))).expect("load");
    assert_eq!(settings.log_level, LogLevel::Warning);
    assert!(settings.home.to_string_lossy().ends_with(".kfc"));
}

#[test]
fn given_config_file_when_load_then_values_applied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kfc.toml");
    fs::write(
        &path,
        r#"
home = "/srv/kfc"
log_level = "debug"
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load");

    assert_eq!(settings.home, PathBuf::from("/srv/kfc"));
    assert_eq!(settings.log_level, LogLevel::Debug);
}

#[test]
fn given_partial_config_when_load_then_unspecified_fields_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kfc.toml");
    fs::write(&path, "log_level = \"warn\"\n").unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load");

    assert_eq!(settings.log_level, LogLevel::Warning);
    assert!(settings.home.to_string_lossy().ends_with(".kfc"));
}

#[test]
fn given_home_with_env_var_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kfc.toml");
    fs::write(&path, "home = \"$HOME/trading\"\n").unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert_eq!(settings.home, PathBuf::from(home).join("trading"));
}

#[test]
fn given_malformed_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kfc.toml");
    fs::write(&path, "log_level = \"loud\"\n").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "{err:?}");
}
