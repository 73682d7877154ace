//! Error types for the client layer

use thiserror::Error;

/// Client operation errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Http(String),

    /// The server replied with an error envelope
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided error message
        message: String,
    },

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Identity-token acquisition failure
    #[error("Identity error: {0}")]
    Identity(String),

    /// An authenticated call was made without a session
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e.to_string())
    }
}
