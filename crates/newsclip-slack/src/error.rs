//! Error types for webhook delivery

use thiserror::Error;

/// Errors from the strict delivery path
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// URL does not carry the Slack incoming-webhook prefix; rejected before
    /// any network call
    #[error("Invalid Slack webhook URL")]
    InvalidWebhookUrl,

    /// Network or transport failure
    #[error("Slack delivery failed: {0}")]
    Transport(String),

    /// Slack replied with a non-success status
    #[error("Slack rejected the message (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },
}
