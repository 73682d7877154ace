//! POST /auth/login - identity-token exchange and session issue

use super::AppState;
use crate::error::ApiError;
use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    #[serde(rename = "googleToken")]
    google_token: Option<String>,
}

/// Exchange a Google OAuth token for a local profile and a session JWT.
pub(super) async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = request
        .google_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Google token is required".to_string()))?;

    let profile = state.identity.fetch_profile(&token).await.map_err(|e| {
        error!(detail = %e, "identity exchange failure");
        ApiError::Provider("Failed to fetch user info".to_string())
    })?;

    let user = state.store()?.find_or_create_user(&profile)?;

    let jwt = state
        .sessions
        .generate_token(&user)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(user_id = %user.id, "login");

    Ok(Json(json!({
        "success": true,
        "jwt": jwt,
        "user": user,
    })))
}
