//! Scrap record - a persisted page + summary bundle

use crate::persona::Persona;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted extraction + summarization result.
///
/// Created on summarization-commit; updated when sent to Slack (recording the
/// delivery target and user comment); never auto-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scrap {
    /// Scrap id
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Source page URL
    pub url: String,

    /// Source page title
    pub title: String,

    /// Summary lines flattened to newline-joined text
    pub summary: String,

    /// Extracted keywords
    pub keywords: Vec<String>,

    /// Persona the summary was generated with
    pub persona: Persona,

    /// Insight line
    pub insight: String,

    /// Comment attached at delivery time
    pub user_comment: Option<String>,

    /// Word count of the source content, when the client supplied it
    pub word_count: Option<i64>,

    /// Last delivery target, set once the scrap has been sent
    pub integration_id: Option<Uuid>,

    /// Creation instant (unix seconds)
    pub created_at: u64,
}
