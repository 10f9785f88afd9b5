use pretty_assertions::assert_eq;
use std::fs;
use streamchat::cli::Args;
use streamchat::config::{Config, FileConfig, DEFAULT_API_ENDPOINT};
use streamchat::ChatError;
use tempfile::TempDir;

#[test]
fn test_load_yaml_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streamchat.yaml");
    fs::write(
        &path,
        "api:\n  endpoint: http://localhost:8000\n  stream_timeout: 60\ndisplay:\n  show_tool_results: false\n",
    )
    .unwrap();

    let file = FileConfig::load_from(&path).unwrap();
    assert_eq!(file.api.endpoint.as_deref(), Some("http://localhost:8000"));
    assert_eq!(file.api.stream_timeout, Some(60));
    assert_eq!(file.api.connect_timeout, None);
    assert_eq!(file.display.show_tool_results, Some(false));
    assert_eq!(file.display.verbose, None);
}

#[test]
fn test_load_json_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".streamchat.json");
    fs::write(
        &path,
        r#"{"api": {"endpoint": "https://chat.example.com/chat"}, "display": {"verbose": true}}"#,
    )
    .unwrap();

    let file = FileConfig::load_from(&path).unwrap();
    assert_eq!(
        file.api.endpoint.as_deref(),
        Some("https://chat.example.com/chat")
    );
    assert_eq!(file.display.verbose, Some(true));

    let config = Config::resolve(&Args::default(), |_: &str| None, file).unwrap();
    assert_eq!(config.api_endpoint, "https://chat.example.com");
    assert!(config.verbose);
    assert!(config.show_tool_results);
}

#[test]
fn test_sections_are_optional() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streamchat.yml");
    fs::write(&path, "display:\n  verbose: false\n").unwrap();

    let file = FileConfig::load_from(&path).unwrap();
    assert_eq!(file.api.endpoint, None);

    let config = Config::resolve(&Args::default(), |_: &str| None, file).unwrap();
    assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    assert_eq!(config.stream_timeout, 30);
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streamchat.yaml");
    fs::write(&path, "api: [unclosed").unwrap();

    let err = FileConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("streamchat.yaml"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = FileConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_init_writes_loadable_example() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("streamchat");

    let path = FileConfig::init_in(&config_dir).unwrap();
    assert!(path.exists());

    let file = FileConfig::load_from(&path).unwrap();
    assert_eq!(file.api.endpoint.as_deref(), Some(DEFAULT_API_ENDPOINT));
    assert_eq!(file.api.stream_timeout, Some(30));
    assert_eq!(file.display.show_tool_results, Some(true));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streamchat.yaml");
    fs::write(&path, "api: {}\n").unwrap();

    let result = FileConfig::init_in(dir.path());
    assert!(matches!(result, Err(ChatError::Config(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "api: {}\n");
}
