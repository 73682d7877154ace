//! Auth session management.
//!
//! Login acquires an identity token through the injected provider, exchanges
//! it at the server, and persists `{user, jwt, last_login}` through the
//! key-value port. Every auth request resolves to exactly one outcome.

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::messages::{AuthOutcome, AuthRequest};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use chrono::Utc;
use newsclip_domain::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Storage key for the persisted session
pub const AUTH_KEY: &str = "newsclip_auth";

/// Identity-token acquisition port.
///
/// Platform adapters implement the interactive/silent distinction; the
/// static adapter serves tests and headless use.
#[async_trait]
pub trait IdentityTokenProvider: Send + Sync {
    /// Acquire an identity token, interactively when allowed
    async fn acquire_token(&self, interactive: bool) -> Result<String, ClientError>;
}

/// Fixed-token adapter
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    /// Always yields the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Always fails acquisition
    pub fn unavailable() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl IdentityTokenProvider for StaticTokenProvider {
    async fn acquire_token(&self, _interactive: bool) -> Result<String, ClientError> {
        self.token
            .clone()
            .ok_or_else(|| ClientError::Identity("no identity token available".to_string()))
    }
}

/// Persisted session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user profile
    pub user: User,

    /// Session token for owner-scoped calls
    pub jwt: String,

    /// Login instant (RFC 3339)
    pub last_login: String,
}

/// Handles auth requests against the ports and the server API.
pub struct AuthManager {
    tokens: Arc<dyn IdentityTokenProvider>,
    storage: Arc<dyn KeyValueStore>,
    api: ApiClient,
}

impl AuthManager {
    /// Create a manager over the given adapters
    pub fn new(
        tokens: Arc<dyn IdentityTokenProvider>,
        storage: Arc<dyn KeyValueStore>,
        api: ApiClient,
    ) -> Self {
        Self {
            tokens,
            storage,
            api,
        }
    }

    /// Handle one auth request to its terminal outcome. Failures map to the
    /// `Error` outcome; nothing escapes as a panic or a dangling request.
    pub async fn handle(&self, request: AuthRequest) -> AuthOutcome {
        match request {
            AuthRequest::Login => match self.login().await {
                Ok(user) => AuthOutcome::LoggedIn { user },
                Err(e) => AuthOutcome::Error {
                    error: e.to_string(),
                },
            },
            AuthRequest::Logout => match self.storage.remove(AUTH_KEY).await {
                Ok(()) => AuthOutcome::LoggedOut,
                Err(e) => AuthOutcome::Error {
                    error: e.to_string(),
                },
            },
            AuthRequest::Check => match self.session().await {
                Ok(session) => AuthOutcome::Status {
                    authenticated: session.is_some(),
                    user: session.map(|s| s.user),
                },
                Err(e) => AuthOutcome::Error {
                    error: e.to_string(),
                },
            },
            AuthRequest::GetToken => match self.session().await {
                Ok(session) => AuthOutcome::Token {
                    token: session.map(|s| s.jwt),
                },
                Err(e) => AuthOutcome::Error {
                    error: e.to_string(),
                },
            },
        }
    }

    /// Read the persisted session, if any
    pub async fn session(&self) -> Result<Option<AuthSession>, ClientError> {
        match self.storage.get(AUTH_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| ClientError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    async fn login(&self) -> Result<User, ClientError> {
        let token = self.tokens.acquire_token(true).await?;
        let (user, jwt) = self.api.login(&token).await?;

        let session = AuthSession {
            user: user.clone(),
            jwt,
            last_login: Utc::now().to_rfc3339(),
        };
        let raw =
            serde_json::to_string(&session).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(AUTH_KEY, &raw).await?;

        info!(user_id = %user.id, "session established");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use newsclip_domain::SubscriptionTier;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            google_id: "g-1".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            profile_picture: None,
            subscription_tier: SubscriptionTier::Free,
            created_at: 1_700_000_000,
            last_login_at: 1_700_000_000,
        }
    }

    fn manager_with(storage: Arc<MemoryStore>, tokens: StaticTokenProvider) -> AuthManager {
        AuthManager::new(
            Arc::new(tokens),
            storage,
            ApiClient::new("http://localhost:1"),
        )
    }

    async fn seed_session(storage: &MemoryStore, user: &User) {
        let session = AuthSession {
            user: user.clone(),
            jwt: "jwt-token".to_string(),
            last_login: Utc::now().to_rfc3339(),
        };
        storage
            .set(AUTH_KEY, &serde_json::to_string(&session).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_without_session() {
        let storage = Arc::new(MemoryStore::new());
        let manager = manager_with(storage, StaticTokenProvider::unavailable());

        match manager.handle(AuthRequest::Check).await {
            AuthOutcome::Status {
                authenticated,
                user,
            } => {
                assert!(!authenticated);
                assert!(user.is_none());
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_and_get_token_with_session() {
        let storage = Arc::new(MemoryStore::new());
        let user = test_user();
        seed_session(&storage, &user).await;

        let manager = manager_with(storage, StaticTokenProvider::unavailable());

        match manager.handle(AuthRequest::Check).await {
            AuthOutcome::Status {
                authenticated,
                user: session_user,
            } => {
                assert!(authenticated);
                assert_eq!(session_user.unwrap().id, user.id);
            }
            other => panic!("expected Status, got {:?}", other),
        }

        match manager.handle(AuthRequest::GetToken).await {
            AuthOutcome::Token { token } => assert_eq!(token.as_deref(), Some("jwt-token")),
            other => panic!("expected Token, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let storage = Arc::new(MemoryStore::new());
        seed_session(&storage, &test_user()).await;

        let manager = manager_with(storage.clone(), StaticTokenProvider::unavailable());

        assert!(matches!(
            manager.handle(AuthRequest::Logout).await,
            AuthOutcome::LoggedOut
        ));
        assert_eq!(storage.get(AUTH_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_without_identity_token_is_an_error_outcome() {
        let storage = Arc::new(MemoryStore::new());
        let manager = manager_with(storage, StaticTokenProvider::unavailable());

        match manager.handle(AuthRequest::Login).await {
            AuthOutcome::Error { error } => assert!(error.contains("Identity")),
            other => panic!("expected Error, got {:?}", other),
        }
    }
}
