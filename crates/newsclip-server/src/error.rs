//! API error taxonomy and response mapping.
//!
//! Every handler error maps onto one of five classes; the JSON body is
//! always `{success: false, error}` and internal detail never leaks past the
//! boundary (it is logged instead).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error classes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input malformed or missing (400); never retried
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired session token (401)
    #[error("Unauthorized")]
    Auth,

    /// Resource missing, inactive, or owned by someone else (404); the same
    /// response either way, so existence is not leaked to non-owners
    #[error("{0}")]
    NotFound(String),

    /// Upstream provider failed (500); detail is logged, not returned
    #[error("{0}")]
    Provider(String),

    /// Anything unexpected (500); detail is logged, not returned
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always false
    pub success: bool,

    /// User-facing message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Provider(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            success: false,
            error: message,
        });
        (status, body).into_response()
    }
}

impl From<newsclip_store::StoreError> for ApiError {
    fn from(e: newsclip_store::StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<newsclip_summarizer::ProviderError> for ApiError {
    fn from(e: newsclip_summarizer::ProviderError) -> Self {
        error!(detail = %e, "completion provider failure");
        match e {
            newsclip_summarizer::ProviderError::MissingApiKey => {
                ApiError::Provider("Completion provider is not configured".to_string())
            }
            _ => ApiError::Provider("Completion provider request failed".to_string()),
        }
    }
}

impl From<newsclip_summarizer::SummarizeError> for ApiError {
    fn from(e: newsclip_summarizer::SummarizeError) -> Self {
        match e {
            newsclip_summarizer::SummarizeError::Provider(p) => p.into(),
            newsclip_summarizer::SummarizeError::Parse(msg) => {
                error!(detail = %msg, "unparseable provider reply");
                ApiError::Provider("Failed to parse AI response".to_string())
            }
        }
    }
}

impl From<newsclip_slack::DeliveryError> for ApiError {
    fn from(e: newsclip_slack::DeliveryError) -> Self {
        match e {
            newsclip_slack::DeliveryError::InvalidWebhookUrl => {
                ApiError::Validation("Invalid Slack webhook URL".to_string())
            }
            other => {
                error!(detail = %other, "slack delivery failure");
                ApiError::Provider("Slack delivery failed".to_string())
            }
        }
    }
}
