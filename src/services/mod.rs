//! Services module
//!
//! This module wires the translation core to its remote API and owns the
//! single shared instance of every service.

pub mod remote;

pub use remote::{MissingTranslation, RemoteTranslationApi};

use std::sync::Arc;

use serde::Serialize;

use crate::config::Settings;
use crate::i18n::{
    CacheStats, LocaleTranslator, MissingKeyReporter, MissingKeyStats, NegotiationInput,
    TranslationCache, TranslationLoader, Translator,
};
use crate::utils::errors::Result;

/// Container for all translation services
///
/// Built once at startup and shared by handle; tests build their own
/// isolated instances.
#[derive(Debug, Clone)]
pub struct I18nServices {
    pub settings: Arc<Settings>,
    pub remote: RemoteTranslationApi,
    pub cache: Arc<TranslationCache>,
    pub loader: Arc<TranslationLoader>,
    pub reporter: Arc<MissingKeyReporter>,
    pub translator: Translator,
}

impl I18nServices {
    /// Create all services from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let remote = RemoteTranslationApi::new(&settings.remote)?;
        let cache = Arc::new(TranslationCache::new());
        let loader = Arc::new(TranslationLoader::new(
            Arc::clone(&cache),
            remote.clone(),
            &settings.i18n,
            settings.remote.cache_ttl(),
        ));
        let reporter = Arc::new(MissingKeyReporter::new(remote.clone(), &settings.i18n));
        let translator = Translator::new(Arc::clone(&cache), Arc::clone(&reporter));

        Ok(Self {
            settings: Arc::new(settings),
            remote,
            cache,
            loader,
            reporter,
            translator,
        })
    }

    /// Pick the locale for a request from its cookie and `Accept-Language`
    pub fn negotiate(&self, cookie_locale: &str, accept_language: &str) -> String {
        let i18n = &self.settings.i18n;
        if !i18n.detect_browser_locale {
            return i18n.default_locale.clone();
        }

        NegotiationInput {
            cookie_locale,
            accept_language,
            supported_locales: &i18n.locales,
            default_locale: &i18n.default_locale,
        }
        .resolve()
    }

    /// Make sure the locale's dictionary is loaded and return a translator
    /// bound to it
    pub async fn translator_for(&self, locale: &str) -> LocaleTranslator {
        self.loader.load(locale).await;
        self.translator.for_locale(locale)
    }

    /// Health check for all services
    pub fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            remote_configured: self.remote.is_configured(),
            cached_locales: self.cache.len(),
            supported_locales: self.settings.i18n.locales.len(),
            fetches_in_flight: self.loader.in_flight(),
        }
    }

    /// Diagnostics snapshot
    pub fn stats(&self) -> I18nStats {
        I18nStats {
            default_locale: self.settings.i18n.default_locale.clone(),
            locales: self.settings.i18n.locales.clone(),
            module_name: self.settings.i18n.module_name.clone(),
            cache_ttl_seconds: self.loader.ttl().as_secs(),
            cache: self.cache.stats(),
            missing: self.reporter.stats(),
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub remote_configured: bool,
    pub cached_locales: usize,
    pub supported_locales: usize,
    pub fetches_in_flight: usize,
}

impl ServiceHealthStatus {
    /// Healthy once a remote is configured and every locale is cached
    pub fn is_healthy(&self) -> bool {
        self.remote_configured && self.cached_locales >= self.supported_locales
    }

    /// Get list of issues
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.remote_configured {
            issues.push("Remote translation API endpoint not configured".to_string());
        }
        if self.cached_locales < self.supported_locales {
            issues.push(format!(
                "Only {} of {} locales cached",
                self.cached_locales, self.supported_locales
            ));
        }

        issues
    }
}

/// Translation diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct I18nStats {
    pub default_locale: String,
    pub locales: Vec<String>,
    pub module_name: String,
    pub cache_ttl_seconds: u64,
    pub cache: Vec<CacheStats>,
    pub missing: MissingKeyStats,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}
