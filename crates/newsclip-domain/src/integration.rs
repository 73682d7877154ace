//! Integration record - a registered outbound webhook destination

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Slack workspace connection owned by one user.
///
/// Created only after a test delivery to the webhook succeeds; mutated by the
/// activation toggle; deleted explicitly. Only the owning user may read,
/// toggle, or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Integration id
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Incoming-webhook URL; always matches the Slack services prefix
    pub webhook_url: String,

    /// Human label for the destination workspace
    pub workspace_name: String,

    /// Whether deliveries may target this integration
    pub is_active: bool,

    /// Creation instant (unix seconds)
    pub created_at: u64,
}
