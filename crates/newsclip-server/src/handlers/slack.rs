//! POST /send-slack - direct, unauthenticated delivery

use super::AppState;
use crate::error::ApiError;
use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use newsclip_slack::{build_message, is_valid_webhook_url, ClipPayload};
use serde::Deserialize;
use serde_json::{json, Value};

/// Summary field accepted as either a single string or a list of lines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SummaryField {
    /// Pre-split lines
    Lines(Vec<String>),

    /// Newline-joined text
    Text(String),
}

impl SummaryField {
    fn into_lines(self) -> Vec<String> {
        match self {
            SummaryField::Lines(lines) => lines,
            SummaryField::Text(text) => text
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            SummaryField::Lines(lines) => lines.is_empty(),
            SummaryField::Text(text) => text.is_empty(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SendSlackRequest {
    #[serde(rename = "webhookUrl")]
    webhook_url: Option<String>,
    title: Option<String>,
    url: Option<String>,
    summary: Option<SummaryField>,
    keywords: Option<Vec<String>>,
    insight: Option<String>,
    comment: Option<String>,
}

/// Validate, build the block message, and deliver it.
pub(super) async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendSlackRequest>,
) -> Result<Json<Value>, ApiError> {
    let (webhook_url, title, url, summary) = match (
        request.webhook_url.filter(|v| !v.is_empty()),
        request.title.filter(|v| !v.is_empty()),
        request.url.filter(|v| !v.is_empty()),
        request.summary.filter(|v| !v.is_empty()),
    ) {
        (Some(webhook_url), Some(title), Some(url), Some(summary)) => {
            (webhook_url, title, url, summary)
        }
        _ => {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ))
        }
    };

    if !is_valid_webhook_url(&webhook_url) {
        return Err(ApiError::Validation(
            "Invalid Slack Webhook URL".to_string(),
        ));
    }

    let payload = ClipPayload {
        title,
        url,
        summary: summary.into_lines(),
        keywords: request.keywords.unwrap_or_default(),
        insight: request.insight.filter(|i| !i.is_empty()),
        persona: None,
    };
    let message = build_message(&payload, request.comment.as_deref());

    state.slack.send(&webhook_url, &message).await?;

    Ok(Json(json!({
        "success": true,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}
