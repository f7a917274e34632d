//! Integration tests for database directory discovery from the environment

use refcat_core::config::{Settings, DATABASE_ENV};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn test_environment_overrides_config_file() {
    let settings = Settings {
        database_dir: Some(PathBuf::from("/from/config")),
        ..Settings::default()
    };

    env::set_var(DATABASE_ENV, "/from/env");
    let resolved = settings.database_dir(None);
    env::remove_var(DATABASE_ENV);

    assert_eq!(resolved, PathBuf::from("/from/env"));
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    env::set_var(DATABASE_ENV, "/from/env");
    let cli = PathBuf::from("/from/cli");
    let resolved = Settings::default().catalog_path(Some(&cli));
    env::remove_var(DATABASE_ENV);

    assert_eq!(resolved, PathBuf::from("/from/cli/catalog-nk.yml"));
}

#[test]
#[serial]
fn test_config_file_used_without_environment() {
    env::remove_var(DATABASE_ENV);
    let settings = Settings {
        database_dir: Some(PathBuf::from("/from/config")),
        ..Settings::default()
    };
    assert_eq!(settings.database_dir(None), PathBuf::from("/from/config"));
}
