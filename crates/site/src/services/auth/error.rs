//! Identity provider error types.

use thiserror::Error;

/// Errors that can occur when talking to the hosted identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request with a human-readable message.
    #[error("{message}")]
    Provider {
        /// HTTP status returned by the provider.
        status: u16,
        /// Message extracted from the provider's error body.
        message: String,
    },

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The access token is missing, expired, or revoked.
    #[error("session expired or invalid")]
    InvalidSession,

    /// The provider returned a body we could not interpret.
    #[error("parse error: {0}")]
    Parse(String),
}
