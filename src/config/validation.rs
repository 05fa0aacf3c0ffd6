//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{I18nError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_i18n_config(&settings.i18n)?;
    validate_remote_config(&settings.remote)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate relay server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(I18nError::Config("Server host is required".to_string()));
    }

    if !config.api_path_prefix.starts_with('/') {
        return Err(I18nError::Config(format!(
            "API path prefix must start with '/': {}",
            config.api_path_prefix
        )));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_locale.is_empty() {
        return Err(I18nError::Config("Default locale is required".to_string()));
    }

    if config.locales.is_empty() {
        return Err(I18nError::Config(
            "At least one supported locale is required".to_string(),
        ));
    }

    if config.locales.iter().any(|locale| locale.trim().is_empty()) {
        return Err(I18nError::Config("Supported locales cannot be empty strings".to_string()));
    }

    if !config.is_supported(&config.default_locale) {
        return Err(I18nError::Config(
            "Default locale must be in supported locales list".to_string(),
        ));
    }

    if config.module_name.is_empty() {
        return Err(I18nError::Config("Module name is required".to_string()));
    }

    if config.cookie_name.is_empty() {
        return Err(I18nError::Config("Cookie name is required".to_string()));
    }

    Ok(())
}

/// Validate remote translation API configuration
///
/// An empty endpoint is allowed: the relay then starts without preloading and
/// answers translation requests with a configuration error payload.
fn validate_remote_config(config: &super::RemoteConfig) -> Result<()> {
    if config.is_configured() {
        url::Url::parse(&config.api_endpoint)?;
    }

    if config.timeout_seconds == 0 {
        return Err(I18nError::Config(
            "Remote API timeout must be greater than 0".to_string(),
        ));
    }

    if config.cache_ttl_seconds == 0 {
        return Err(I18nError::Config(
            "Cache TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(I18nError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(I18nError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
