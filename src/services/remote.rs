//! Remote translation API client
//!
//! This service talks to the upstream translation service: it downloads
//! dictionaries per locale and module, and submits missing translation keys.
//! All requests carry the configured headers and are bounded by the
//! configured timeout.

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::RemoteConfig;
use crate::i18n::Dictionary;
use crate::utils::errors::{I18nError, RemoteError, RemoteResult, Result};

/// Missing translation as submitted to the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingTranslation {
    pub locale: String,
    pub key: String,
    pub value: String,
    pub module: String,
}

/// HTTP client for the remote translation service
#[derive(Debug, Clone)]
pub struct RemoteTranslationApi {
    client: Client,
    api_endpoint: String,
}

impl RemoteTranslationApi {
    /// Create a new client from the remote configuration
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &config.api_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| I18nError::Config(format!("Invalid API header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| I18nError::Config(format!("Invalid value for API header '{}': {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("i18n-relay/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_endpoint: config.api_endpoint.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Whether an endpoint is configured
    pub fn is_configured(&self) -> bool {
        !self.api_endpoint.is_empty()
    }

    /// URL of the dictionary for a locale and module
    pub fn dictionary_url(&self, locale: &str, module: &str) -> Result<Url> {
        let mut url = self.endpoint_url(&["api", "v1", "i18n", "translations", "locale", locale])?;
        url.query_pairs_mut().append_pair("module", module);
        Ok(url)
    }

    /// URL missing translations are posted to
    pub fn missing_url(&self) -> Result<Url> {
        self.endpoint_url(&["api", "v1", "internal", "i18n", "translations"])
    }

    /// Fetch the dictionary of a locale and module
    pub async fn fetch_dictionary(&self, locale: &str, module: &str) -> Result<Dictionary> {
        let url = self.dictionary_url(locale, module)?;
        debug!(locale = locale, module = module, url = %url, "Fetching translations");

        let started = Instant::now();
        let response = self.client.get(url).send().await.map_err(map_request_error)?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await.map_err(map_request_error)?;
        let dictionary: Dictionary = serde_json::from_slice(&body)
            .map_err(|e| RemoteError::InvalidResponse(format!("expected a flat object of strings: {}", e)))?;

        debug!(
            locale = locale,
            keys = dictionary.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Translations received"
        );
        Ok(dictionary)
    }

    /// Submit a missing translation and return the remote acknowledgement
    pub async fn submit_missing(&self, missing: &MissingTranslation) -> Result<serde_json::Value> {
        let url = self.missing_url()?;
        debug!(locale = %missing.locale, key = %missing.key, url = %url, "Posting missing translation");

        let response = self
            .client
            .post(url)
            .json(missing)
            .send()
            .await
            .map_err(map_request_error)?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await.map_err(map_request_error)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }

        let acknowledgement = serde_json::from_slice(&body)
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        Ok(acknowledgement)
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        if !self.is_configured() {
            return Err(I18nError::Config("API endpoint is not configured".to_string()));
        }

        let mut url = Url::parse(&self.api_endpoint)?;
        url.path_segments_mut()
            .map_err(|_| I18nError::Config(format!("API endpoint cannot be a base URL: {}", self.api_endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn map_request_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_connect() {
        RemoteError::ServiceUnavailable
    } else {
        RemoteError::RequestFailed(e.to_string())
    }
}

async fn ensure_success(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}
