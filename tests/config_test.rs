// tests/config_test.rs
use semver_release::config::{load_config, Config, CONFIG_FILE_NAME};
use semver_release::ReleaseError;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.prefixes.release_prefix, "release/v");
    assert_eq!(config.prefixes.tag_prefix, "v");
    assert!(!config.behavior.aliases);
    assert_eq!(config.behavior.remote, "origin");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[prefixes]
release_prefix = "rel-"
tag_prefix = "pkg-v"

[behavior]
aliases = true
push = true
remote = "upstream"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.prefixes.release_prefix, "rel-");
    assert_eq!(config.prefixes.tag_prefix, "pkg-v");
    assert!(config.behavior.aliases);
    assert!(config.behavior.push);
    assert_eq!(config.behavior.remote, "upstream");
}

#[test]
fn test_load_rejects_invalid_prefix() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[prefixes]\ntag_prefix = \"v~\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_load_rejects_malformed_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[prefixes\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
    assert!(err.to_string().contains("Cannot parse"));
}

#[test]
fn test_load_missing_custom_file() {
    let err = load_config(Some("/nonexistent/semver-release.toml")).unwrap_err();
    assert!(matches!(err, ReleaseError::Io(_)));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[prefixes]\nrelease_prefix = \"stable/\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    let config = result.unwrap();
    assert_eq!(config.prefixes.release_prefix, "stable/");
    assert_eq!(config.prefixes.tag_prefix, "v");
}
