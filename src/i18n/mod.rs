//! Internationalization module
//!
//! This module holds the translation core: locale negotiation, the shared
//! dictionary cache, cache-or-fetch loading, key lookup with interpolation,
//! and missing-key reporting.

pub mod cache;
pub mod dictionary;
pub mod loader;
pub mod negotiator;
pub mod reporter;
pub mod translator;

// Re-export commonly used i18n components
pub use cache::{CacheEntry, CacheStats, TranslationCache};
pub use dictionary::Dictionary;
pub use loader::{LoadResult, PreloadReport, TranslationLoader};
pub use negotiator::{cookie_value, negotiate, parse_accept_language, LanguagePreference, NegotiationInput};
pub use reporter::{MissingKeyReporter, MissingKeyStats};
pub use translator::{format_message, params, LocaleTranslator, ParamValue, TranslationParams, Translator};
