//! Missing translation key reporting
//!
//! Each distinct (locale, key) pair is forwarded to the remote API at most
//! once per process lifetime. Reporting never fails from the caller's point
//! of view: network errors are logged and dropped.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::I18nConfig;
use crate::services::remote::{MissingTranslation, RemoteTranslationApi};
use crate::utils::errors::Result;
use crate::utils::logging::log_missing_key;

/// Missing key counters for diagnostics
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingKeyStats {
    pub total: usize,
    pub per_locale: BTreeMap<String, usize>,
}

/// Deduplicating reporter of missing translation keys
#[derive(Debug)]
pub struct MissingKeyReporter {
    remote: RemoteTranslationApi,
    module_name: String,
    default_locale: String,
    reported: Mutex<HashSet<(String, String)>>,
}

impl MissingKeyReporter {
    pub fn new(remote: RemoteTranslationApi, config: &I18nConfig) -> Self {
        Self {
            remote,
            module_name: config.module_name.clone(),
            default_locale: config.default_locale.clone(),
            reported: Mutex::new(HashSet::new()),
        }
    }

    /// Text shown in place of a missing translation: the key itself in the
    /// default locale, nothing elsewhere
    pub fn fallback_value(&self, locale: &str, key: &str) -> String {
        if locale == self.default_locale {
            key.to_string()
        } else {
            String::new()
        }
    }

    /// Record a missing key and notify the remote API in the background
    ///
    /// Returns immediately. Outside a tokio runtime the key is still recorded
    /// but no notification is sent.
    pub fn report(self: &Arc<Self>, locale: &str, key: &str) {
        if !self.record(locale, key) {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let reporter = Arc::clone(self);
                let locale = locale.to_string();
                let key = key.to_string();
                handle.spawn(async move {
                    reporter.notify(&locale, &key).await;
                });
            }
            Err(_) => {
                warn!(locale = locale, key = key, "No async runtime, missing key recorded but not reported");
            }
        }
    }

    /// Record a missing key and wait for the notification
    ///
    /// Returns `true` only when this call sent a notification that the remote
    /// API acknowledged.
    pub async fn report_now(&self, locale: &str, key: &str) -> bool {
        if !self.record(locale, key) {
            return false;
        }
        self.notify(locale, key).await
    }

    /// Forward a missing translation without deduplication
    pub async fn submit(&self, missing: &MissingTranslation) -> Result<serde_json::Value> {
        self.remote.submit_missing(missing).await
    }

    pub fn is_reported(&self, locale: &str, key: &str) -> bool {
        self.reported
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(locale.to_string(), key.to_string()))
    }

    pub fn stats(&self) -> MissingKeyStats {
        let reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
        let mut stats = MissingKeyStats {
            total: reported.len(),
            per_locale: BTreeMap::new(),
        };
        for (locale, _) in reported.iter() {
            *stats.per_locale.entry(locale.clone()).or_default() += 1;
        }
        stats
    }

    /// Check-and-insert; `true` if the pair was not recorded before
    fn record(&self, locale: &str, key: &str) -> bool {
        let inserted = self
            .reported
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((locale.to_string(), key.to_string()));

        if inserted {
            log_missing_key(locale, key);
        }
        inserted
    }

    async fn notify(&self, locale: &str, key: &str) -> bool {
        if !self.remote.is_configured() {
            debug!(locale = locale, key = key, "No API endpoint configured, missing key not sent");
            return false;
        }

        let missing = MissingTranslation {
            locale: locale.to_string(),
            key: key.to_string(),
            value: self.fallback_value(locale, key),
            module: self.module_name.clone(),
        };

        match self.remote.submit_missing(&missing).await {
            Ok(_) => {
                debug!(locale = locale, key = key, "Missing key reported");
                true
            }
            Err(e) => {
                warn!(locale = locale, key = key, error = %e, "Failed to report missing translation");
                false
            }
        }
    }
}
