//! /integrations - webhook destination CRUD.
//!
//! Registration is gated on a successful test delivery: a dead webhook is
//! never persisted.

use super::AppState;
use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use newsclip_slack::is_valid_webhook_url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

/// GET /integrations
pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let user_id = state.authenticate(&headers)?;
    let integrations = state.store()?.list_integrations(user_id)?;

    Ok(Json(json!({
        "success": true,
        "integrations": integrations,
    })))
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateIntegrationRequest {
    webhook_url: Option<String>,
    workspace_name: Option<String>,
}

/// POST /integrations
pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateIntegrationRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = state.authenticate(&headers)?;

    let webhook_url = request
        .webhook_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Validation("Webhook URL is required".to_string()))?;

    if !is_valid_webhook_url(&webhook_url) {
        return Err(ApiError::Validation(
            "Invalid Slack Webhook URL. URL must start with https://hooks.slack.com/services/"
                .to_string(),
        ));
    }

    // Registering a dead webhook is rejected before anything is persisted
    if !state.slack.send_test_message(&webhook_url).await {
        return Err(ApiError::Validation(
            "Failed to send test message. Please check your Webhook URL.".to_string(),
        ));
    }

    let workspace_name = request
        .workspace_name
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| "Slack Workspace".to_string());

    let integration = state
        .store()?
        .create_integration(user_id, &webhook_url, &workspace_name)?;

    info!(user_id = %user_id, integration_id = %integration.id, "integration created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "integration": integration,
            "message": "Slack integration added successfully",
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateIntegrationRequest {
    is_active: Option<bool>,
}

/// PATCH /integrations/:id
pub(super) async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateIntegrationRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_id = state.authenticate(&headers)?;

    let is_active = request
        .is_active
        .ok_or_else(|| ApiError::Validation("is_active must be a boolean".to_string()))?;

    let integration = state
        .store()?
        .set_integration_active(id, user_id, is_active)?
        .ok_or_else(|| {
            ApiError::NotFound("Integration not found or you do not have permission".to_string())
        })?;

    Ok(Json(json!({
        "success": true,
        "integration": integration,
        "message": format!(
            "Integration {} successfully",
            if is_active { "activated" } else { "deactivated" }
        ),
    })))
}

/// DELETE /integrations/:id
pub(super) async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let user_id = state.authenticate(&headers)?;

    if !state.store()?.delete_integration(id, user_id)? {
        return Err(ApiError::NotFound(
            "Integration not found or you do not have permission".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Integration deleted successfully",
    })))
}
