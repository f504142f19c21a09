//! Common utilities shared by the client and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::Config;
pub use error::{Error, Result};

/// Format a UTC instant the way the test management API expects it
pub fn format_timestamp(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Current UTC time in the API timestamp format
pub fn utc_timestamp() -> String {
    format_timestamp(chrono::Utc::now())
}
