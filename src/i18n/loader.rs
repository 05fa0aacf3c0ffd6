//! Translation loading
//!
//! The loader answers "give me the dictionary for this locale": it serves a
//! fresh cache entry when there is one and otherwise fetches from the remote
//! translation API. Concurrent loads of the same locale share a single
//! in-flight fetch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use futures::future::{self, BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

use super::{Dictionary, TranslationCache};
use crate::config::I18nConfig;
use crate::services::remote::RemoteTranslationApi;
use crate::utils::errors::{I18nError, RemoteError};
use crate::utils::logging::{log_api_error, log_cache_event, log_fetch_result};

/// Outcome of a load shared between all callers of one fetch
pub type LoadResult = std::result::Result<Arc<Dictionary>, Arc<I18nError>>;

type SharedFetch = Shared<BoxFuture<'static, LoadResult>>;
type InFlight = Arc<Mutex<HashMap<String, SharedFetch>>>;

/// Result of preloading every supported locale
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    pub loaded: Vec<(String, usize)>,
    pub failed: Vec<String>,
}

/// Cache-or-fetch dictionary loader
pub struct TranslationLoader {
    cache: Arc<TranslationCache>,
    remote: RemoteTranslationApi,
    locales: Vec<String>,
    module_name: String,
    ttl: Duration,
    in_flight: InFlight,
}

impl std::fmt::Debug for TranslationLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationLoader")
            .field("locales", &self.locales)
            .field("module_name", &self.module_name)
            .field("ttl", &self.ttl)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// Removes an in-flight entry when the fetch task ends, even by panic
struct InFlightGuard {
    in_flight: InFlight,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl TranslationLoader {
    pub fn new(
        cache: Arc<TranslationCache>,
        remote: RemoteTranslationApi,
        config: &I18nConfig,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            remote,
            locales: config.locales.clone(),
            module_name: config.module_name.clone(),
            ttl,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Dictionary for `locale` in the configured module
    ///
    /// Failures are logged and yield an empty dictionary; nothing is cached,
    /// so the next call retries.
    pub async fn load(&self, locale: &str) -> Arc<Dictionary> {
        match self.try_load(locale).await {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!(locale = locale, error = %e, "Serving empty dictionary");
                Arc::new(Dictionary::new())
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces the failure
    pub async fn try_load(&self, locale: &str) -> LoadResult {
        self.try_load_module(locale, &self.module_name).await
    }

    /// Load a dictionary for an explicit module
    ///
    /// The cache is keyed by locale and only holds the configured module;
    /// other modules are single-flighted but always fetched.
    pub async fn try_load_module(&self, locale: &str, module: &str) -> LoadResult {
        self.ensure_supported(locale)?;

        let cacheable = module == self.module_name;
        if cacheable {
            if let Some(dictionary) = self.cache.get_fresh(locale, self.ttl) {
                log_cache_event(locale, true, Some(self.cache.age(locale)));
                return Ok(dictionary);
            }
            let age = self.cache.has(locale).then(|| self.cache.age(locale));
            log_cache_event(locale, false, age);
        }

        self.shared_fetch(locale, module, cacheable, false).await
    }

    /// Refetch a locale ignoring the TTL
    pub async fn refresh(&self, locale: &str) -> LoadResult {
        self.ensure_supported(locale)?;
        self.shared_fetch(locale, &self.module_name, true, true).await
    }

    /// Load every supported locale concurrently
    pub async fn preload_all(&self) -> PreloadReport {
        if !self.remote.is_configured() {
            info!("Skipping translation preload: no API endpoint configured");
            return PreloadReport::default();
        }

        info!(locales = ?self.locales, "Preloading translations for all locales");

        let results = future::join_all(self.locales.iter().map(|locale| async move {
            (locale.clone(), self.try_load(locale).await)
        }))
        .await;

        let mut report = PreloadReport::default();
        for (locale, result) in results {
            match result {
                Ok(dictionary) => {
                    info!(locale = %locale, keys = dictionary.len(), "Preloaded translations");
                    report.loaded.push((locale, dictionary.len()));
                }
                Err(e) => {
                    warn!(locale = %locale, error = %e, "Failed to preload translations");
                    report.failed.push(locale);
                }
            }
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Translation preload finished"
        );
        report
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Number of fetches currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn ensure_supported(&self, locale: &str) -> std::result::Result<(), Arc<I18nError>> {
        if self.locales.iter().any(|supported| supported == locale) {
            Ok(())
        } else {
            Err(Arc::new(I18nError::UnsupportedLocale {
                locale: locale.to_string(),
            }))
        }
    }

    /// Join the fetch in flight for this locale and module, or start one
    fn shared_fetch(&self, locale: &str, module: &str, cacheable: bool, force: bool) -> SharedFetch {
        let key = if cacheable {
            locale.to_string()
        } else {
            format!("{}:{}", locale, module)
        };

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(fetch) = in_flight.get(&key) {
            debug!(locale = locale, module = module, "Joining in-flight fetch");
            return fetch.clone();
        }

        // A fetch that finished after our cache check has already stored its
        // result; its in-flight entry is only removed after the cache write.
        if cacheable && !force {
            if let Some(dictionary) = self.cache.get_fresh(locale, self.ttl) {
                return future::ready::<LoadResult>(Ok(dictionary)).boxed().shared();
            }
        }

        let fetch = self.spawn_fetch(key.clone(), locale, module, cacheable);
        in_flight.insert(key, fetch.clone());
        fetch
    }

    fn spawn_fetch(&self, key: String, locale: &str, module: &str, cacheable: bool) -> SharedFetch {
        let guard = InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            key,
        };
        let cache = Arc::clone(&self.cache);
        let remote = self.remote.clone();
        let locale = locale.to_string();
        let module = module.to_string();

        let task = tokio::spawn(async move {
            let _guard = guard;
            let started = Instant::now();
            let result = remote.fetch_dictionary(&locale, &module).await.map(Arc::new);
            let duration_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(dictionary) => {
                    if cacheable {
                        cache.set(&locale, Arc::clone(dictionary));
                    }
                    log_fetch_result(&locale, &module, Some(dictionary.len()), duration_ms);
                }
                Err(e) => {
                    log_api_error("translations", &e.to_string(), Some(&locale));
                    log_fetch_result(&locale, &module, None, duration_ms);
                }
            }

            result.map_err(Arc::new)
        });

        async move {
            task.await.unwrap_or_else(|e| {
                Err(Arc::new(I18nError::Remote(RemoteError::RequestFailed(format!(
                    "fetch task failed: {}",
                    e
                )))))
            })
        }
        .boxed()
        .shared()
    }
}
