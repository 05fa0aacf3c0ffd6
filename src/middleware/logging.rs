//! Logging middleware
//!
//! This module provides request logging for the relay endpoints: method,
//! path, status and latency, with a warning for slow requests.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

/// Requests slower than this are logged as slow
pub const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_millis(1000);

/// Log every request once its response is ready
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let duration = started.elapsed();
    let duration_ms = duration.as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(method = %method, path = %path, status = status, duration_ms = duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        warn!(method = %method, path = %path, status = status, duration_ms = duration_ms, "Request rejected");
    } else {
        info!(method = %method, path = %path, status = status, duration_ms = duration_ms, "Request completed");
    }

    if duration > SLOW_REQUEST_THRESHOLD {
        warn!(method = %method, path = %path, duration_ms = duration_ms, "Slow request detected");
    }

    response
}
