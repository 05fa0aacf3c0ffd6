//! i18n-relay
//!
//! Server-side internationalization support for web applications.
//! This library resolves a request's locale, caches translation dictionaries
//! fetched from a remote translation API, translates keys with placeholder
//! interpolation, and reports missing keys back to the remote API.

pub mod config;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{I18nError, Result};

// Re-export main components for easy access
pub use i18n::{Dictionary, MissingKeyReporter, TranslationCache, TranslationLoader, Translator};
pub use services::I18nServices;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
