//! Captured page snapshot handed across the message boundary

use serde::{Deserialize, Serialize};

/// Document readiness at capture time.
///
/// The caller is expected to have waited for load; the classifier re-checks
/// defensively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Document still parsing
    Loading,

    /// DOM ready, subresources may still be loading
    Interactive,

    /// Fully loaded
    Complete,
}

/// One captured page: location, serialized markup, readiness.
///
/// Extraction is idempotent over a snapshot; re-running it is safe, just
/// wasteful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Location URL at capture time
    pub url: String,

    /// Serialized document markup
    pub html: String,

    /// Readiness at capture time
    pub readiness: Readiness,
}

impl PageSnapshot {
    /// Convenience constructor for a fully-loaded page
    pub fn complete(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            readiness: Readiness::Complete,
        }
    }
}
