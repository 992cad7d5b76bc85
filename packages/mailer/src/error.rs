//! Error types for the mailer client.

use thiserror::Error;

/// Result type for mailer operations.
pub type Result<T> = std::result::Result<T, MailerError>;

/// Mailer client errors.
#[derive(Debug, Error)]
pub enum MailerError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response from the mail provider)
    #[error("Mail API error ({status}): {message}")]
    Api { status: u16, message: String },
}
