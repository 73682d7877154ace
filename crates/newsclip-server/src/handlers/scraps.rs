//! /scraps - persisted clip CRUD and delivery.
//!
//! Create runs summarization synchronously and persists inputs and outputs
//! as one row. Send re-validates ownership of both the scrap and the target
//! integration (which must be active) before any delivery.

use super::AppState;
use crate::error::ApiError;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use newsclip_domain::Persona;
use newsclip_slack::{build_message, ClipPayload};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

/// GET /scraps
pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user_id = state.authenticate(&headers)?;
    let scraps = state.store()?.list_scraps(user_id)?;

    Ok(Json(json!({
        "success": true,
        "scraps": scraps,
    })))
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateScrapRequest {
    url: Option<String>,
    title: Option<String>,
    content: Option<String>,
    persona: Option<String>,
    word_count: Option<i64>,
}

/// POST /scraps
pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateScrapRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = state.authenticate(&headers)?;

    let (url, title, content, persona_str) = match (
        request.url.filter(|v| !v.is_empty()),
        request.title.filter(|v| !v.is_empty()),
        request.content.filter(|v| !v.is_empty()),
        request.persona.filter(|v| !v.is_empty()),
    ) {
        (Some(url), Some(title), Some(content), Some(persona)) => (url, title, content, persona),
        _ => {
            return Err(ApiError::Validation(
                "Missing required fields: url, title, content, persona".to_string(),
            ))
        }
    };

    let persona = Persona::parse(&persona_str).ok_or_else(|| {
        ApiError::Validation(
            "Invalid persona. Must be one of: general, marketing, dev, biz".to_string(),
        )
    })?;

    let summary = state.summarizer.summarize(&content, &title, persona).await?;

    let scrap = state.store()?.create_scrap(
        user_id,
        &url,
        &title,
        &summary.summary_text(),
        &summary.keywords,
        persona,
        &summary.insight,
        request.word_count,
    )?;

    info!(user_id = %user_id, scrap_id = %scrap.id, persona = persona.as_str(), "scrap created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "scrap": scrap,
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub(super) struct SendScrapRequest {
    scrap_id: Option<Uuid>,
    integration_id: Option<Uuid>,
    user_comment: Option<String>,
}

/// POST /scraps/send
pub(super) async fn send(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SendScrapRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = state.authenticate(&headers)?;

    let (scrap_id, integration_id) = match (request.scrap_id, request.integration_id) {
        (Some(scrap_id), Some(integration_id)) => (scrap_id, integration_id),
        _ => {
            return Err(ApiError::Validation(
                "Missing required fields: scrap_id, integration_id".to_string(),
            ))
        }
    };

    // Ownership checks: both lookups are owner-scoped, and the integration
    // must be active. Either miss reads as not-found.
    let (scrap, integration) = {
        let store = state.store()?;
        let scrap = store.get_scrap(scrap_id, user_id)?.ok_or_else(|| {
            ApiError::NotFound("Scrap not found or you do not have permission".to_string())
        })?;
        let integration = store
            .get_active_integration(integration_id, user_id)?
            .ok_or_else(|| {
                ApiError::NotFound(
                    "Integration not found, inactive, or you do not have permission".to_string(),
                )
            })?;
        (scrap, integration)
    };

    let comment = request.user_comment.clone().or(scrap.user_comment.clone());

    let payload = ClipPayload {
        title: scrap.title.clone(),
        url: scrap.url.clone(),
        summary: scrap
            .summary
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        keywords: scrap.keywords.clone(),
        insight: Some(scrap.insight.clone()).filter(|i| !i.is_empty()),
        persona: Some(scrap.persona),
    };
    let message = build_message(&payload, comment.as_deref());

    state
        .slack
        .send(&integration.webhook_url, &message)
        .await
        .map_err(|e| {
            error!(detail = %e, "scrap delivery failure");
            ApiError::Provider("Failed to send message to Slack".to_string())
        })?;

    state
        .store()?
        .record_scrap_delivery(scrap_id, user_id, integration_id, comment.as_deref())?;

    info!(user_id = %user_id, scrap_id = %scrap_id, integration_id = %integration_id, "scrap sent");

    Ok(Json(json!({
        "success": true,
        "message": "Scrap sent to Slack successfully",
    })))
}
