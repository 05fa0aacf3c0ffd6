//! Mock translation API server for testing
//!
//! Wraps a wiremock server that simulates the remote translation service:
//! the dictionary endpoint per locale/module and the missing key endpoint.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const MISSING_PATH: &str = "/api/v1/internal/i18n/translations";

pub fn dictionary_path(locale: &str) -> String {
    format!("/api/v1/i18n/translations/locale/{}", locale)
}

/// Configuration for a mocked dictionary response
#[derive(Debug, Clone)]
pub struct MockDictionary {
    pub status: u16,
    pub body: Value,
    pub delay_ms: Option<u64>,
    pub expected_calls: Option<u64>,
}

impl MockDictionary {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay_ms: None,
            expected_calls: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            status,
            body: json!({ "detail": "upstream failure" }),
            delay_ms: None,
            expected_calls: None,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn expect(mut self, calls: u64) -> Self {
        self.expected_calls = Some(calls);
        self
    }
}

/// Mock remote translation API
pub struct TranslationApiMock {
    pub server: MockServer,
}

impl TranslationApiMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mount a dictionary response for a locale in a module
    pub async fn mock_dictionary(&self, locale: &str, module: &str, config: MockDictionary) {
        let mut response = ResponseTemplate::new(config.status).set_body_json(config.body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }

        let mut mock = Mock::given(method("GET"))
            .and(path(dictionary_path(locale)))
            .and(query_param("module", module))
            .respond_with(response);
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    /// Mount the missing key endpoint
    pub async fn mock_missing(&self, status: u16, expected_calls: Option<u64>) {
        let mut mock = Mock::given(method("POST"))
            .and(path(MISSING_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "id": 42, "created": true })));
        if let Some(calls) = expected_calls {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    /// Requests received on a path so far
    pub async fn requests_to(&self, request_path: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == request_path)
            .collect()
    }

    /// Wait until at least `count` requests reached a path, or time out
    pub async fn wait_for_requests(&self, request_path: &str, count: usize) -> Vec<Request> {
        for _ in 0..50 {
            let requests = self.requests_to(request_path).await;
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.requests_to(request_path).await
    }

    pub async fn verify(&self) {
        self.server.verify().await;
    }
}
