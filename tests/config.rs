//! Config file loading from disk.

use std::fs;

use devart::config::load_config;
use devart::models::Config;
use tempfile::TempDir;

#[test]
fn partial_file_is_merged_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devart.toml");
    fs::write(
        &path,
        r#"
        [server]
        bind = "127.0.0.1:4100"

        [site]
        name = "Mirror"
        visitor_badge = true

        [cache]
        top_secs = 120
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.server.bind, "127.0.0.1:4100");
    assert_eq!(config.site.name, "Mirror");
    assert!(config.site.visitor_badge);
    assert_eq!(config.cache.top_secs, 120);
    assert_eq!(config.cache.latest_secs, 300);
    assert_eq!(config.feeds.per_page, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn unreadable_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[server\nbind = ").unwrap();

    assert!(Config::load(&path).is_err());
    let config = Config::load_or_default(&path);
    assert_eq!(config.server.bind, "127.0.0.1:3000");
}

#[test]
fn invalid_values_fail_validation_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devart.toml");
    fs::write(&path, "[feeds]\nper_page = 0\n").unwrap();

    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devart.toml");
    let mut config = Config::default();
    config.site.tagline = "Fresh posts".to_string();
    fs::write(&path, config.to_toml().unwrap()).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.site.tagline, "Fresh posts");
}
