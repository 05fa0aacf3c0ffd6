//! Utility modules
//!
//! This module contains common utilities used throughout the relay,
//! including error handling and logging setup.

pub mod errors;
pub mod logging;

pub use errors::{I18nError, RemoteError, Result};
