//! Locale endpoints
//!
//! `GET <prefix>/locale` reports the locale negotiated for the request;
//! `PUT <prefix>/locale` switches locale by setting the locale cookie.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::middleware::RequestLocale;
use crate::services::I18nServices;
use crate::utils::errors::I18nError;

/// Cookie lifetime when a locale is chosen explicitly (one year)
pub const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

#[derive(Debug, Serialize)]
pub struct LocaleInfo {
    pub locale: String,
    pub locales: Vec<String>,
    pub default_locale: String,
}

#[derive(Debug, Deserialize)]
pub struct SetLocaleRequest {
    pub locale: String,
}

pub async fn current_locale(
    State(services): State<I18nServices>,
    Extension(locale): Extension<RequestLocale>,
) -> Json<LocaleInfo> {
    Json(LocaleInfo {
        locale: locale.0,
        locales: services.settings.i18n.locales.clone(),
        default_locale: services.settings.i18n.default_locale.clone(),
    })
}

pub async fn set_locale(
    State(services): State<I18nServices>,
    body: Result<Json<SetLocaleRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(json!({
                    "success": false,
                    "error": "Invalid request body",
                    "message": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    let i18n = &services.settings.i18n;
    if !i18n.is_supported(&request.locale) {
        warn!(
            locale = %request.locale,
            available = ?i18n.locales,
            "Locale is not supported"
        );
        let err = I18nError::UnsupportedLocale { locale: request.locale };
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": err.label(),
                "message": err.to_string(),
            })),
        )
            .into_response();
    }

    // Switching locale should not hit a cold cache on the next page
    services.loader.load(&request.locale).await;

    let cookie = locale_cookie(&i18n.cookie_name, &request.locale);
    info!(locale = %request.locale, "Locale switched");

    match HeaderValue::from_str(&cookie) {
        Ok(cookie) => (
            [(SET_COOKIE, cookie)],
            Json(json!({ "success": true, "locale": request.locale })),
        )
            .into_response(),
        Err(e) => I18nError::InvalidInput(format!("Invalid locale cookie: {}", e)).into_response(),
    }
}

/// `Set-Cookie` value persisting the chosen locale
pub fn locale_cookie(cookie_name: &str, locale: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        cookie_name,
        urlencoding::encode(locale),
        LOCALE_COOKIE_MAX_AGE
    )
}
