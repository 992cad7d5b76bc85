//! Error types for the Google Forms client.

use thiserror::Error;

/// Result type for Forms client operations.
pub type Result<T> = std::result::Result<T, FormsError>;

/// Google Forms client errors.
#[derive(Debug, Error)]
pub enum FormsError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response from the Forms API)
    #[error("Forms API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}
