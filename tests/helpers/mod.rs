//! Test helpers module
//!
//! Mock translation API, settings builders and an in-process relay server.

#![allow(dead_code)]

pub mod translation_mock;

pub use translation_mock::*;

use std::net::SocketAddr;

use i18n_relay::{config::Settings, handlers, I18nServices};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const TEST_MODULE: &str = "main";
pub const TEST_API_KEY: &str = "test-api-key";

/// Settings pointing at a mock endpoint with en/fr/de supported
pub fn test_settings(api_endpoint: &str) -> Settings {
    let mut settings = Settings::default();
    settings.i18n.default_locale = "en".to_string();
    settings.i18n.locales = vec!["en".to_string(), "fr".to_string(), "de".to_string()];
    settings.i18n.module_name = TEST_MODULE.to_string();
    settings.remote.api_endpoint = api_endpoint.to_string();
    settings
        .remote
        .api_headers
        .insert("x-api-key".to_string(), TEST_API_KEY.to_string());
    settings
}

pub fn test_services(api_endpoint: &str) -> I18nServices {
    I18nServices::new(test_settings(api_endpoint)).expect("Failed to build services")
}

/// Relay server running on an ephemeral port
pub struct RelayHandle {
    pub address: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl RelayHandle {
    pub async fn spawn(services: I18nServices) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = listener.local_addr().expect("Listener has no address");
        let (shutdown, signal) = oneshot::channel::<()>();

        tokio::spawn(handlers::serve(listener, services, async move {
            let _ = signal.await;
        }));

        Self {
            address,
            client: reqwest::Client::new(),
            shutdown: Some(shutdown),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }
}

impl Drop for RelayHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
