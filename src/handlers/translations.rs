//! Dictionary endpoint
//!
//! `GET <prefix>/translations?locale=<code>&module=<name>` returns the cached
//! or freshly fetched dictionary, or an `{error, message}` payload.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::services::I18nServices;
use crate::utils::errors::I18nError;

#[derive(Debug, Deserialize)]
pub struct TranslationsQuery {
    pub locale: Option<String>,
    pub module: Option<String>,
}

pub async fn get_translations(
    State(services): State<I18nServices>,
    Query(query): Query<TranslationsQuery>,
) -> Response {
    let Some(locale) = query.locale.filter(|locale| !locale.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing locale parameter" })),
        )
            .into_response();
    };

    if !services.remote.is_configured() {
        error!("API endpoint is not configured");
        return I18nError::Config("API endpoint is not configured".to_string()).into_response();
    }

    let module = query
        .module
        .filter(|module| !module.is_empty())
        .unwrap_or_else(|| services.settings.i18n.module_name.clone());

    match services.loader.try_load_module(&locale, &module).await {
        Ok(dictionary) => Json(&*dictionary).into_response(),
        Err(e) => match e.as_ref() {
            I18nError::Remote(_) | I18nError::Http(_) => (
                e.status_code(),
                Json(json!({
                    "error": "Failed to fetch translations",
                    "message": e.to_string(),
                })),
            )
                .into_response(),
            other => other.to_response(),
        },
    }
}
