//! Request locale middleware
//!
//! Negotiates the locale of every request from its locale cookie and
//! `Accept-Language` header and stores it as a [`RequestLocale`] extension.

use axum::extract::{Request, State};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::i18n::cookie_value;
use crate::services::I18nServices;

/// Locale negotiated for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub String);

impl RequestLocale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub async fn negotiate_locale(
    State(services): State<I18nServices>,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = locale_from_headers(&services, request.headers());
    debug!(locale = %locale, path = %request.uri().path(), "Negotiated request locale");

    request.extensions_mut().insert(RequestLocale(locale));
    next.run(request).await
}

/// Negotiate a locale from raw request headers
pub fn locale_from_headers(services: &I18nServices, headers: &HeaderMap) -> String {
    let cookie_name = &services.settings.i18n.cookie_name;

    let cookie_locale = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie_value(header, cookie_name))
        .unwrap_or_default();

    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    services.negotiate(&cookie_locale, accept_language)
}
