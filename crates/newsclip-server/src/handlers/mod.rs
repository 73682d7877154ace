//! HTTP request handlers.
//!
//! All endpoints return a JSON `{success, ...}` envelope. OPTIONS returns
//! 200 on every route; any other unsupported method returns 405 with the
//! same envelope shape. Owner-scoped endpoints authenticate via
//! `Authorization: Bearer <session token>`.

mod auth;
mod integrations;
mod scraps;
mod slack;
mod summarize;


use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::session::SessionManager;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch, post};
use axum::Router as AxumRouter;
use newsclip_slack::SlackClient;
use newsclip_store::SqliteStore;
use newsclip_summarizer::Summarizer;
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence
    pub store: Arc<Mutex<SqliteStore>>,

    /// Session token issue/verify
    pub sessions: Arc<SessionManager>,

    /// Summarization facade
    pub summarizer: Arc<Summarizer>,

    /// Webhook delivery
    pub slack: Arc<SlackClient>,

    /// Identity-token exchange
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Lock the store, translating a poisoned lock into an internal error
    pub(crate) fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))
    }

    /// Resolve the bearer session token into the caller's user id
    pub(crate) fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, ApiError> {
        let header = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Auth)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::Auth)?;
        let claims = self
            .sessions
            .validate_token(token)
            .map_err(|_| ApiError::Auth)?;

        Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Auth)
    }
}

/// OPTIONS on every route: 200 with permissive CORS headers (the CORS layer
/// attaches them)
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Unsupported method on a known route
async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"success": false, "error": "Method not allowed"})),
    )
        .into_response()
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route(
            "/auth/login",
            post(auth::login)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/integrations",
            get(integrations::list)
                .post(integrations::create)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/integrations/:id",
            patch(integrations::update)
                .delete(integrations::remove)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/scraps",
            get(scraps::list)
                .post(scraps::create)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/scraps/send",
            post(scraps::send)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/send-slack",
            post(slack::send)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/summarize",
            post(summarize::summarize)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
