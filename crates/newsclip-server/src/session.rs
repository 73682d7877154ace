//! Session tokens.
//!
//! Login issues a signed JWT whose subject is the internal user id, carrying
//! the user id, email, and subscription tier as claims. Verification
//! re-checks signature and issuer; expired or tampered tokens verify as
//! invalid, never as a panic.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use newsclip_domain::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pinned issuer on every token
pub const ISSUER: &str = "newsclip";

/// Session management error
#[derive(Debug, Error)]
pub enum SessionError {
    /// JWT encoding failed
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// Token expired
    #[error("Session token expired")]
    TokenExpired,

    /// Invalid token (bad signature, wrong issuer, malformed)
    #[error("Invalid session token")]
    InvalidToken,
}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: internal user id
    pub sub: String,

    /// Internal user id (duplicated for the client)
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Account email
    pub email: String,

    /// Subscription tier at issue time
    #[serde(rename = "subscriptionTier")]
    pub subscription_tier: String,

    /// Token expiration timestamp (unix seconds)
    pub exp: u64,

    /// Issued-at timestamp (unix seconds)
    pub iat: u64,

    /// Issuer
    pub iss: String,
}

/// Issues and validates session tokens.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

impl SessionManager {
    /// Create a session manager with the given secret and expiry
    pub fn new(jwt_secret: &str, token_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
        }
    }

    /// Issue a session token for the given user
    pub fn generate_token(&self, user: &User) -> Result<String, SessionError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = SessionClaims {
            sub: user.id.to_string(),
            user_id: user.id.to_string(),
            email: user.email.clone(),
            subscription_tier: user.subscription_tier.as_str().to_string(),
            exp: now + self.token_expiry_secs,
            iat: now,
            iss: ISSUER.to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token, re-checking signature and issuer
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}
