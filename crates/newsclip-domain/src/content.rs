//! Extraction result for a single page

use serde::{Deserialize, Serialize};

/// Readable content captured from one web page.
///
/// Created once per extraction invocation and never mutated afterwards; the
/// UI layer holds it until the next extraction replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page URL at capture time
    pub url: String,

    /// Page title (Open Graph > Twitter card > `<title>` > "Untitled")
    pub title: String,

    /// Normalized plain-text body, capped at [`crate::limits::CONTENT_MAX`]
    pub content: String,

    /// Best-effort description from document metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Best-effort author from document metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Best-effort publication date from document metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    /// Number of whitespace-delimited tokens in `content`
    pub word_count: usize,

    /// Capture instant (unix seconds)
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_without_absent_metadata() {
        let content = PageContent {
            url: "https://example.com/post".to_string(),
            title: "A post".to_string(),
            content: "Body text".to_string(),
            excerpt: None,
            author: None,
            published_date: None,
            word_count: 2,
            timestamp: 1_700_000_000,
        };

        let json = serde_json::to_string(&content).unwrap();
        assert!(!json.contains("excerpt"));
        assert!(!json.contains("author"));
        assert!(json.contains("word_count"));
    }
}
