//! Middleware module
//!
//! This module contains middleware for request processing

pub mod locale;
pub mod logging;

// Re-export commonly used middleware
pub use locale::{locale_from_headers, negotiate_locale, RequestLocale};
pub use logging::log_requests;
