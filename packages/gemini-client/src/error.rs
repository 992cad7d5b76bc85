//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response, rate limit)
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (no candidates, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}
