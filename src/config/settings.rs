//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default cache lifetime for a fetched dictionary (one hour)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relay HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_path_prefix: String,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
    pub module_name: String,
    pub cookie_name: String,
    pub detect_browser_locale: bool,
}

/// Remote translation API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_endpoint: String,
    pub api_headers: HashMap<String, String>,
    pub timeout_seconds: u64,
    pub cache_ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));

        Self::build(builder)
    }

    /// Load settings from an explicit configuration file, still honouring
    /// environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let settings = builder
            .add_source(
                config::Environment::with_prefix("I18N_RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("i18n.locales")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        settings.i18n.dedup_locales();
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::I18nError> {
        super::validation::validate_settings(self)
    }
}

impl I18nConfig {
    /// Check if a locale is part of the supported set
    pub fn is_supported(&self, locale: &str) -> bool {
        self.locales.iter().any(|supported| supported == locale)
    }

    /// Remove duplicate locales while keeping their first-seen order
    pub fn dedup_locales(&mut self) {
        let mut seen = Vec::with_capacity(self.locales.len());
        self.locales.retain(|locale| {
            if seen.contains(locale) {
                false
            } else {
                seen.push(locale.clone());
                true
            }
        });
    }
}

impl RemoteConfig {
    /// Whether a remote endpoint has been configured at all
    pub fn is_configured(&self) -> bool {
        !self.api_endpoint.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3100,
            api_path_prefix: "/_i18n".to_string(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
            module_name: "main".to_string(),
            cookie_name: "locale".to_string(),
            detect_browser_locale: true,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            api_headers: HashMap::new(),
            timeout_seconds: 5,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
