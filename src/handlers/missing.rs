//! Missing key endpoint
//!
//! `POST <prefix>/missing` forwards a missing translation reported by a
//! client to the remote API and relays its acknowledgement.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::services::{I18nServices, MissingTranslation};
use crate::utils::errors::I18nError;

/// Body of a missing key report; only `locale` and `key` are required
#[derive(Debug, Default, Deserialize)]
pub struct MissingKeyRequest {
    pub locale: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub module: Option<String>,
}

pub async fn report_missing(
    State(services): State<I18nServices>,
    body: Result<Json<MissingKeyRequest>, JsonRejection>,
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

    let non_empty = |value: Option<String>| value.filter(|value| !value.is_empty());
    let (Some(locale), Some(key)) = (non_empty(request.locale), non_empty(request.key)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields: locale and key are required" })),
        )
            .into_response();
    };

    if !services.settings.i18n.is_supported(&locale) {
        let err = I18nError::UnsupportedLocale { locale };
        return failure(&err);
    }

    if !services.remote.is_configured() {
        error!("API endpoint is not configured");
        return I18nError::Config("API endpoint is not configured".to_string()).into_response();
    }

    let missing = MissingTranslation {
        value: non_empty(request.value)
            .unwrap_or_else(|| services.reporter.fallback_value(&locale, &key)),
        module: non_empty(request.module)
            .unwrap_or_else(|| services.settings.i18n.module_name.clone()),
        locale,
        key,
    };

    info!(locale = %missing.locale, key = %missing.key, module = %missing.module, "Forwarding missing key");

    match services.reporter.submit(&missing).await {
        Ok(response) => Json(json!({ "success": true, "response": response })).into_response(),
        Err(e) => {
            error!(error = %e, "Error calling API");
            failure(&e)
        }
    }
}

fn failure(err: &I18nError) -> Response {
    (
        err.status_code(),
        Json(json!({
            "success": false,
            "error": err.label(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
