//! User record

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription tier for free/pro gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Default tier for every new account
    Free,

    /// Paid tier
    Pro,
}

impl SubscriptionTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
        }
    }

    /// Parse a tier from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(SubscriptionTier::Free),
            "pro" => Some(SubscriptionTier::Pro),
            _ => None,
        }
    }
}

/// A registered user.
///
/// Created on first external-identity login; `name`, `profile_picture`, and
/// `last_login_at` refresh on every subsequent login. The identity key is
/// `google_id`, not the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal user id
    pub id: Uuid,

    /// External identity id (stable across logins)
    pub google_id: String,

    /// Account email
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar URL, when the identity provider supplies one
    pub profile_picture: Option<String>,

    /// Free/pro gating
    pub subscription_tier: SubscriptionTier,

    /// Creation instant (unix seconds)
    pub created_at: u64,

    /// Most recent login instant (unix seconds)
    pub last_login_at: u64,
}
