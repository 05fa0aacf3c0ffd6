//! Configuration loading tests

use std::io::Write;
use std::time::Duration;

use i18n_relay::config::Settings;
use tempfile::NamedTempFile;
use tokio_test::{assert_err, assert_ok};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_load_from_toml_file() {
    let file = config_file(
        r#"
        [server]
        port = 4200
        api_path_prefix = "/i18n"

        [i18n]
        default_locale = "ru"
        locales = ["ru", "en", "ru"]
        module_name = "storefront"
        detect_browser_locale = false

        [remote]
        api_endpoint = "https://translations.example.com"
        cache_ttl_seconds = 120

        [remote.api_headers]
        x-api-key = "secret"
        "#,
    );

    let settings = assert_ok!(Settings::load_from(file.path()));

    assert_eq!(settings.server.port, 4200);
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.api_path_prefix, "/i18n");
    assert_eq!(settings.i18n.default_locale, "ru");
    assert_eq!(settings.i18n.locales, vec!["ru", "en"]);
    assert_eq!(settings.i18n.module_name, "storefront");
    assert_eq!(settings.i18n.cookie_name, "locale");
    assert!(!settings.i18n.detect_browser_locale);
    assert_eq!(settings.remote.cache_ttl(), Duration::from_secs(120));
    assert_eq!(settings.remote.timeout(), Duration::from_secs(5));
    assert_eq!(
        settings.remote.api_headers.get("x-api-key").map(String::as_str),
        Some("secret")
    );
    assert_ok!(settings.validate());
}

#[test]
fn test_missing_file_is_an_error() {
    assert_err!(Settings::load_from("/nonexistent/i18n-relay.toml"));
}

#[test]
fn test_default_locale_must_be_supported() {
    let file = config_file(
        r#"
        [i18n]
        default_locale = "de"
        locales = ["en", "fr"]
        "#,
    );

    let settings = assert_ok!(Settings::load_from(file.path()));
    assert_err!(settings.validate());
}

#[test]
fn test_invalid_endpoint_fails_validation() {
    let file = config_file(
        r#"
        [remote]
        api_endpoint = "not a url"
        "#,
    );

    let settings = assert_ok!(Settings::load_from(file.path()));
    assert_err!(settings.validate());
}

#[test]
fn test_zero_ttl_fails_validation() {
    let file = config_file(
        r#"
        [remote]
        api_endpoint = "http://localhost:9000"
        cache_ttl_seconds = 0
        "#,
    );

    let settings = assert_ok!(Settings::load_from(file.path()));
    assert_err!(settings.validate());
}

#[test]
fn test_unconfigured_endpoint_is_valid() {
    let settings = Settings::default();
    assert!(!settings.remote.is_configured());
    assert_ok!(settings.validate());
}
