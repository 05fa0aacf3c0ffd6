//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the translation relay.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;
use crate::utils::errors::{I18nError, Result};

/// Initialize logging based on configuration
///
/// Returns the file writer guard when a log file is configured; it must be
/// held for as long as file logging should keep flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| I18nError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(file_path) => {
            let path = Path::new(file_path);
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "i18n-relay.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| I18nError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log cache lookups
pub fn log_cache_event(locale: &str, hit: bool, age: Option<Duration>) {
    match age {
        Some(age) if hit => debug!(locale = locale, age_ms = age.as_millis() as u64, "Using cached translations"),
        Some(age) => info!(locale = locale, age_ms = age.as_millis() as u64, "Cache expired"),
        None => info!(locale = locale, "Cache miss"),
    }
}

/// Log the outcome of a dictionary fetch
pub fn log_fetch_result(locale: &str, module: &str, keys: Option<usize>, duration_ms: u64) {
    match keys {
        Some(keys) => info!(
            locale = locale,
            module = module,
            keys = keys,
            duration_ms = duration_ms,
            "Fetched translations"
        ),
        None => warn!(
            locale = locale,
            module = module,
            duration_ms = duration_ms,
            "Fetching translations failed"
        ),
    }
}

/// Log a newly recorded missing translation key
pub fn log_missing_key(locale: &str, key: &str) {
    info!(locale = locale, key = key, "Reporting missing key");
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
