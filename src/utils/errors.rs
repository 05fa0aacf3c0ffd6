//! Error handling for i18n-relay
//!
//! This module defines the main error types used throughout the relay
//! and how they are rendered back to HTTP callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Main error type for i18n-relay
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Remote translation API error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Remote translation API specific errors
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out")]
    Timeout,

    #[error("API responded with status: {status}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for i18n-relay operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Result type alias for remote API operations
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

impl I18nError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            I18nError::Config(_) => false,
            I18nError::Settings(_) => false,
            I18nError::Remote(_) => true,
            I18nError::UnsupportedLocale { .. } => false,
            I18nError::Http(_) => true,
            I18nError::Serialization(_) => false,
            I18nError::Io(_) => true,
            I18nError::UrlParse(_) => false,
            I18nError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            I18nError::Config(_) => ErrorSeverity::Critical,
            I18nError::Settings(_) => ErrorSeverity::Critical,
            I18nError::UnsupportedLocale { .. } => ErrorSeverity::Warning,
            I18nError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status used when the error is returned by a relay endpoint
    pub fn status_code(&self) -> StatusCode {
        match self {
            I18nError::UnsupportedLocale { .. } | I18nError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            I18nError::Remote(RemoteError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            I18nError::Remote(_) | I18nError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label rendered in the `error` field of a JSON error payload
    pub fn label(&self) -> &'static str {
        match self {
            I18nError::Config(_) | I18nError::Settings(_) => "API configuration missing",
            I18nError::Remote(_) | I18nError::Http(_) => "API request failed",
            I18nError::UnsupportedLocale { .. } => "Unsupported locale",
            I18nError::InvalidInput(_) => "Invalid input",
            _ => "An error occurred processing the request",
        }
    }

    /// Render the error as a `{error, message}` JSON response
    pub fn to_response(&self) -> Response {
        let body = json!({
            "error": self.label(),
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for I18nError {
    fn into_response(self) -> Response {
        self.to_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
