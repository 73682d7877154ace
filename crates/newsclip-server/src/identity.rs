//! Identity-token exchange seam.
//!
//! Login trades an externally-issued token for a user profile. The real
//! implementation calls the Google userinfo endpoint; tests inject a mock
//! keyed by token.

use async_trait::async_trait;
use newsclip_store::IdentityProfile;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Default userinfo endpoint
pub const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Identity exchange failure
#[derive(Debug, Error)]
#[error("Identity exchange failed: {0}")]
pub struct IdentityError(pub String);

/// Trades an identity token for a profile.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the profile behind the token
    async fn fetch_profile(&self, token: &str) -> Result<IdentityProfile, IdentityError>;
}

/// Google userinfo implementation
pub struct GoogleIdentityProvider {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    name: String,
    picture: Option<String>,
}

impl GoogleIdentityProvider {
    /// Create a provider against the default userinfo endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_USERINFO_URL)
    }

    /// Create a provider against a custom endpoint (test servers)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

impl Default for GoogleIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn fetch_profile(&self, token: &str) -> Result<IdentityProfile, IdentityError> {
        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError(format!(
                "userinfo returned HTTP {}",
                response.status()
            )));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| IdentityError(format!("userinfo decode failed: {}", e)))?;

        Ok(IdentityProfile {
            google_id: info.id,
            email: info.email,
            name: info.name,
            profile_picture: info.picture,
        })
    }
}

/// Mock provider keyed by token; unknown tokens fail the exchange.
#[derive(Default)]
pub struct MockIdentityProvider {
    profiles: HashMap<String, IdentityProfile>,
}

impl MockIdentityProvider {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile for a token
    pub fn with_profile(mut self, token: impl Into<String>, profile: IdentityProfile) -> Self {
        self.profiles.insert(token.into(), profile);
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn fetch_profile(&self, token: &str) -> Result<IdentityProfile, IdentityError> {
        self.profiles
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityError("unknown token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_known_and_unknown_tokens() {
        let provider = MockIdentityProvider::new().with_profile(
            "tok-1",
            IdentityProfile {
                google_id: "g-1".to_string(),
                email: "a@example.com".to_string(),
                name: "A".to_string(),
                profile_picture: None,
            },
        );

        let profile = provider.fetch_profile("tok-1").await.unwrap();
        assert_eq!(profile.google_id, "g-1");

        assert!(provider.fetch_profile("tok-2").await.is_err());
    }
}
