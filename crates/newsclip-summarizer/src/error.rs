//! Error types for the summarization layer

use thiserror::Error;

/// Errors from the completion provider boundary
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key configured for the provider
    #[error("Completion provider API key is not configured")]
    MissingApiKey,

    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Provider replied with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body text, for server-side logging
        body: String,
    },

    /// Provider replied 2xx but the envelope was not decodable
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Errors from the strict-JSON summarize path
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The provider call itself failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider replied, but not with the requested JSON shape
    #[error("Failed to parse summarization reply: {0}")]
    Parse(String),
}
