//! Error types for publishing test results
//!
//! Messages carry enough context (names, ids, status codes, response bodies)
//! to diagnose a failed CI step from the log alone.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the results publisher
#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    #[error("Test plan '{name}' not found")]
    PlanNotFound { name: String },

    #[error("Test suite '{name}' not found in plan {plan_id}")]
    SuiteNotFound { name: String, plan_id: i64 },

    // === Remote API Errors ===
    #[error("{method} {url} failed with status {status}: {body}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected Response while {action}: status_code: {status} response_text: {body}")]
    UnexpectedResponse {
        action: String,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === Input Errors ===
    #[error("Test results file not found: {path}")]
    InputNotFound { path: String },

    #[error("Invalid test results file '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a non-success status error for a GET/POST call
    pub fn http_status(method: &str, url: &str, status: u16, body: &str) -> Self {
        Self::HttpStatus {
            method: method.to_string(),
            url: url.to_string(),
            status,
            body: body.to_string(),
        }
    }

    /// Create an unexpected response error for a PATCH call
    pub fn unexpected_response(action: &str, status: u16, body: &str) -> Self {
        Self::UnexpectedResponse {
            action: action.to_string(),
            status,
            body: body.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(path: &str, reason: impl ToString) -> Self {
        Self::InvalidInput {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error means a plan or suite name did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlanNotFound { .. } | Self::SuiteNotFound { .. })
    }
}
