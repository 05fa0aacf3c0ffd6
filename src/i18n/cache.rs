//! Process-wide translation cache
//!
//! Maps a locale to the last successfully fetched dictionary and the time it
//! was fetched. Entries are replaced wholesale; a reader always sees either
//! the previous dictionary or the new one, never a mix.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::Dictionary;

/// Cached dictionary with its fetch time
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub dictionary: Arc<Dictionary>,
    pub fetched_at: Instant,
    pub fetched_at_utc: DateTime<Utc>,
}

/// Per-locale cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub locale: String,
    pub keys: usize,
    pub age_ms: u64,
    pub fetched_at: DateTime<Utc>,
}

/// Shared translation cache keyed by locale
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached dictionary for a locale regardless of its age
    pub fn get(&self, locale: &str) -> Option<Arc<Dictionary>> {
        self.read(|entries| entries.get(locale).map(|entry| Arc::clone(&entry.dictionary)))
    }

    /// Get the cached dictionary only if it is younger than `ttl`
    pub fn get_fresh(&self, locale: &str, ttl: Duration) -> Option<Arc<Dictionary>> {
        self.read(|entries| {
            entries
                .get(locale)
                .filter(|entry| entry.fetched_at.elapsed() < ttl)
                .map(|entry| Arc::clone(&entry.dictionary))
        })
    }

    /// Replace the dictionary for a locale and stamp the current time
    pub fn set(&self, locale: &str, dictionary: impl Into<Arc<Dictionary>>) {
        let entry = CacheEntry {
            dictionary: dictionary.into(),
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        };
        let keys = entry.dictionary.len();

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locale.to_string(), entry);

        debug!(locale = locale, keys = keys, "Cached translations");
    }

    pub fn has(&self, locale: &str) -> bool {
        self.read(|entries| entries.contains_key(locale))
    }

    /// Time since the locale was last set, `Duration::MAX` if never set
    pub fn age(&self, locale: &str) -> Duration {
        self.read(|entries| {
            entries
                .get(locale)
                .map_or(Duration::MAX, |entry| entry.fetched_at.elapsed())
        })
    }

    /// Remove one locale, or every locale when `locale` is `None`
    pub fn clear(&self, locale: Option<&str>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match locale {
            Some(locale) => {
                entries.remove(locale);
                debug!(locale = locale, "Cleared cached translations");
            }
            None => {
                entries.clear();
                debug!("Cleared all cached translations");
            }
        }
    }

    /// All cached locales, sorted
    pub fn locales(&self) -> Vec<String> {
        let mut locales = self.read(|entries| entries.keys().cloned().collect::<Vec<_>>());
        locales.sort();
        locales
    }

    pub fn len(&self) -> usize {
        self.read(HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> Vec<CacheStats> {
        let mut stats = self.read(|entries| {
            entries
                .iter()
                .map(|(locale, entry)| CacheStats {
                    locale: locale.clone(),
                    keys: entry.dictionary.len(),
                    age_ms: u64::try_from(entry.fetched_at.elapsed().as_millis()).unwrap_or(u64::MAX),
                    fetched_at: entry.fetched_at_utc,
                })
                .collect::<Vec<_>>()
        });
        stats.sort_by(|a, b| a.locale.cmp(&b.locale));
        stats
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<String, CacheEntry>) -> T) -> T {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f(&entries)
    }
}
