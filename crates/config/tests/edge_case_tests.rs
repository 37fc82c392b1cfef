//! Edge case and error scenario tests

use leadsync_config::{Config, ConfigError, ConfigManager};
use std::fs;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_corrupted_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));
    assert!(manager.load_with_env_overrides().is_err());
    Ok(())
}

#[test]
fn test_init_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let nested_path = temp_dir.path().join("a").join("b").join("c");
    let manager = ConfigManager::with_directory(nested_path)?;

    assert!(manager.initialize(false)?);
    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_explicit_file_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("custom.toml");
    let manager = ConfigManager::with_file(path.clone())?;

    assert!(manager.initialize(false)?);
    assert_eq!(manager.config_path(), path.as_path());
    Ok(())
}

#[test]
fn test_unknown_fields_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "version = 1\n[app]\nlog_level = \"debug\"\ncolor = \"blue\"\n",
    )?;

    let config = manager.load()?;
    assert_eq!(config.app.log_level.to_string(), "debug");
    Ok(())
}

#[test]
fn test_unknown_log_level_fails_to_parse() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[app]\nlog_level = \"loud\"\n")?;

    assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));
    Ok(())
}

#[test]
fn test_wrong_value_type_fails_to_parse() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[sync]\ngrace_seconds = \"thirty\"\n")?;

    assert!(manager.load().is_err());
    Ok(())
}

#[test]
fn test_init_without_force_keeps_edited_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.initialize(false)?;
    fs::write(manager.config_path(), "[sync]\ngrace_seconds = 5\n")?;

    assert!(!manager.initialize(false)?);
    assert_eq!(manager.load()?.sync.grace_seconds, 5);

    assert!(manager.initialize(true)?);
    assert_eq!(manager.load()?.sync.grace_seconds, 30);
    Ok(())
}
