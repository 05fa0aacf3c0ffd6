//! HTTP handlers
//!
//! This module exposes the translation core over HTTP: dictionaries, missing
//! key reports, the request locale and diagnostics.

pub mod diagnostics;
pub mod locale;
pub mod missing;
pub mod translations;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{log_requests, negotiate_locale};
use crate::services::I18nServices;
use crate::utils::errors::Result;

/// Build the relay router
///
/// Translation endpoints live under the configured path prefix; `/health`
/// is always at the root.
pub fn router(services: I18nServices) -> Router {
    let prefix = services
        .settings
        .server
        .api_path_prefix
        .trim_end_matches('/')
        .to_string();

    let api = Router::new()
        .route("/translations", get(translations::get_translations))
        .route("/missing", post(missing::report_missing))
        .route("/locale", get(locale::current_locale).put(locale::set_locale))
        .route("/stats", get(diagnostics::stats));

    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };

    app.route("/health", get(diagnostics::health))
        .layer(from_fn_with_state(services.clone(), negotiate_locale))
        .layer(from_fn(log_requests))
        .with_state(services)
}

/// Serve the relay on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, services: I18nServices, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    let prefix = services.settings.server.api_path_prefix.clone();
    info!(address = %address, prefix = %prefix, "Translation relay listening");

    axum::serve(listener, router(services))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Translation relay stopped");
    Ok(())
}
