//! Diagnostics endpoints

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::services::{I18nServices, I18nStats};

pub async fn stats(State(services): State<I18nServices>) -> Json<I18nStats> {
    Json(services.stats())
}

pub async fn health(State(services): State<I18nServices>) -> Json<Value> {
    let health = services.health_check();
    let status = if health.is_healthy() { "ok" } else { "degraded" };
    let issues = health.get_issues();

    Json(json!({
        "status": status,
        "version": crate::VERSION,
        "issues": issues,
        "services": health,
    }))
}
