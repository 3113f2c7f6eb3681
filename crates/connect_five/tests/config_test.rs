//! Tests for settings loading.

use connect_five::{ServerConfig, Settings};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn settings_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write settings");
    file
}

#[test]
fn test_defaults_without_file() {
    let settings = Settings::load(None).expect("defaults");
    assert_eq!(settings.server().bind_address(), "127.0.0.1:8080");
    assert_eq!(settings.client().server_url(), "http://localhost:8080");
    assert_eq!(settings.client().poll_interval(), Duration::from_millis(2000));
}

#[test]
fn test_full_file() {
    let file = settings_file(
        r#"
[server]
host = "0.0.0.0"
port = 9000

[client]
server_url = "http://game.local:9000"
poll_interval_ms = 250
"#,
    );

    let settings = Settings::load(Some(file.path())).expect("settings");
    assert_eq!(settings.server(), &ServerConfig::new("0.0.0.0".to_string(), 9000));
    assert_eq!(settings.client().server_url(), "http://game.local:9000");
    assert_eq!(*settings.client().poll_interval_ms(), 250);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = settings_file("[server]\nport = 9100\n");

    let settings = Settings::from_file(file.path()).expect("settings");
    assert_eq!(settings.server().host(), "127.0.0.1");
    assert_eq!(*settings.server().port(), 9100);
    assert_eq!(settings.client(), Settings::default().client());
}

#[test]
fn test_command_line_overrides_file() {
    let file = settings_file("[server]\nhost = \"0.0.0.0\"\nport = 9000\n");
    let settings = Settings::load(Some(file.path())).expect("settings");

    let config = settings.server().clone().with_overrides(None, Some(7000));
    assert_eq!(config.bind_address(), "0.0.0.0:7000");

    let client = settings
        .client()
        .clone()
        .with_overrides(Some("http://other:1".to_string()), None);
    assert_eq!(client.server_url(), "http://other:1");
    assert_eq!(*client.poll_interval_ms(), 2000);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert_eq!(err.path, path);
}

#[test]
fn test_malformed_file_is_error() {
    let file = settings_file("[server]\nport = \"not a number\"\n");
    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert_eq!(err.path.as_path(), file.path());
    assert!(err.file.ends_with("config.rs"));
    let shown = err.to_string();
    assert!(shown.starts_with("Invalid settings file "), "{shown}");
    assert!(shown.contains(&file.path().display().to_string()));
}
