//! Error types for the Firestore client.

use thiserror::Error;

/// Result type for Firestore client operations.
pub type Result<T> = std::result::Result<T, FirestoreError>;

/// Firestore client errors.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response from Firestore)
    #[error("Firestore API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}
