//! POST /summarize - the strict-JSON single-endpoint variant

use super::AppState;
use crate::error::ApiError;
use axum::extract::State;
use axum::response::Json;
use newsclip_domain::SummaryMode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(super) struct SummarizeRequest {
    content: Option<String>,
    title: Option<String>,
    url: Option<String>,
    mode: Option<String>,
}

/// Summarize arbitrary content in `summary` or `keywords` mode.
///
/// Unlike the persona path behind /scraps, a malformed provider reply here
/// is a hard 500: this endpoint puts the provider in JSON mode and owns the
/// output contract.
pub(super) async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<Value>, ApiError> {
    let (content, _title, _url, mode_str) = match (
        request.content.filter(|v| !v.is_empty()),
        request.title.filter(|v| !v.is_empty()),
        request.url.filter(|v| !v.is_empty()),
        request.mode.filter(|v| !v.is_empty()),
    ) {
        (Some(content), Some(title), Some(url), Some(mode)) => (content, title, url, mode),
        _ => {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ))
        }
    };

    let mode = SummaryMode::parse(&mode_str)
        .ok_or_else(|| ApiError::Validation("Invalid mode".to_string()))?;

    let started = Instant::now();
    let (parsed, usage) = state.summarizer.summarize_mode(&content, mode).await?;
    let processing_time = started.elapsed().as_secs_f64();

    info!(
        mode = mode.as_str(),
        output_tokens = usage.output_tokens,
        "summarize complete"
    );

    Ok(Json(json!({
        "success": true,
        "data": {
            "summary": parsed.summary,
            "keywords": parsed.keywords,
            "insight": parsed.insight,
            "processingTime": processing_time,
        },
        "usage": {
            "inputTokens": usage.input_tokens,
            "outputTokens": usage.output_tokens,
            "cost": usage.cost,
        },
    })))
}
