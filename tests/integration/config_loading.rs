//! Integration tests for layered configuration loading

use scicopilot::config::ConfigLoader;
use std::fs;
use tempfile::TempDir;

use crate::integration::test_utils::with_config_home;

fn write(path: &std::path::Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    with_config_home(|_| {
        let workspace = TempDir::new().unwrap();
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.connect_timeout_secs, 10);
        assert!(config.session.namespace.is_empty());
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_workspace_file_overrides_global_file() {
    with_config_home(|home| {
        write(
            &home.path().join("scicopilot").join("config.toml"),
            "[service]\nbase_url = \"http://global:8000\"\n\n[session]\nnamespace = \"global\"\n",
        );
        let workspace = TempDir::new().unwrap();
        write(
            &workspace.path().join("config").join("config.toml"),
            "[session]\nnamespace = \"physics\"\n",
        );

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.service.base_url, "http://global:8000");
        assert_eq!(config.session.namespace, "physics");
        assert_eq!(
            ConfigLoader::global_config_path().unwrap(),
            home.path().join("scicopilot").join("config.toml")
        );
    });
}

#[test]
fn test_environment_overrides_files() {
    with_config_home(|_| {
        let workspace = TempDir::new().unwrap();
        write(
            &workspace.path().join("config").join("config.toml"),
            "[service]\nbase_url = \"http://file:8000\"\nrequest_timeout_secs = 5\n",
        );
        std::env::set_var("SCICOPILOT__SERVICE__BASE_URL", "http://env:9000");
        let result = ConfigLoader::load(workspace.path());
        std::env::remove_var("SCICOPILOT__SERVICE__BASE_URL");

        let config = result.unwrap();
        assert_eq!(config.service.base_url, "http://env:9000");
        assert_eq!(config.service.request_timeout_secs, Some(5));
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    with_config_home(|_| {
        let workspace = TempDir::new().unwrap();
        write(
            &workspace.path().join("config").join("config.toml"),
            "[service]\nbase_url = \"localhost:8000\"\n",
        );
        let err = ConfigLoader::load(workspace.path()).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    });
}

#[test]
fn test_explicit_file_must_exist() {
    with_config_home(|_| {
        let dir = TempDir::new().unwrap();
        assert!(ConfigLoader::load_from_file(&dir.path().join("absent.toml")).is_err());

        let path = dir.path().join("custom.toml");
        write(&path, "[logging]\nlevel = \"debug\"\nformat = \"json\"\n");
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    });
}
