//! Error types for Ladle
//!
//! Defines a single error enum covering all failure modes across the client.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for Ladle operations
pub type Result<T> = std::result::Result<T, LadleError>;

/// Error type for Ladle operations
#[derive(Error, Debug)]
pub enum LadleError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/transport errors (backend unreachable)
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication errors (bad credentials, missing session)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Request rejected before any network call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream recipe provider quota exhausted (HTTP 402)
    #[error("Recipe provider quota exceeded")]
    QuotaExceeded,

    /// Non-success response from the backend
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl LadleError {
    /// Whether this error is a transport-level failure that the aggregator
    /// treats as "source unavailable" rather than fatal.
    pub fn is_transport(&self) -> bool {
        match self {
            LadleError::Network(_) => true,
            LadleError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
