//! Page-support gate.
//!
//! Decides whether a snapshot is eligible for extraction at all. Rules are
//! checked in order and short-circuit on the first failure. Deterministic
//! given the same snapshot, no side effects.

use crate::config::ExtractorConfig;
use crate::snapshot::{PageSnapshot, Readiness};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// URL schemes that are never extractable: internal browser surfaces,
/// extension pages, local files.
const DISALLOWED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "about",
    "file",
    "edge",
    "moz-extension",
    "view-source",
];

/// Returns true when the snapshot is eligible for extraction.
pub fn is_supported(snapshot: &PageSnapshot, config: &ExtractorConfig) -> bool {
    // 1. Scheme gate; an unparseable location is treated as unsupported
    let url = match Url::parse(&snapshot.url) {
        Ok(url) => url,
        Err(_) => {
            debug!(url = %snapshot.url, "unparseable location url");
            return false;
        }
    };
    if DISALLOWED_SCHEMES.contains(&url.scheme()) {
        debug!(scheme = url.scheme(), "disallowed scheme");
        return false;
    }

    // 2. Readiness gate
    if snapshot.readiness == Readiness::Loading {
        return false;
    }

    // 3. Minimum visible body text
    let document = Html::parse_document(&snapshot.html);
    let body = Selector::parse("body").unwrap();
    let text_len: usize = document
        .select(&body)
        .flat_map(|b| b.text())
        .map(|t| t.trim().len())
        .sum();

    text_len >= config.min_text_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_body() -> String {
        format!(
            "<html><body><p>{}</p></body></html>",
            "sufficiently long paragraph text ".repeat(10)
        )
    }

    #[test]
    fn test_supported_page() {
        let snapshot = PageSnapshot::complete("https://example.com/post", long_body());
        assert!(is_supported(&snapshot, &ExtractorConfig::default()));
    }

    #[test]
    fn test_disallowed_schemes_rejected_regardless_of_content() {
        for url in [
            "chrome://settings",
            "chrome-extension://abcdef/popup.html",
            "about:blank",
            "file:///home/user/page.html",
            "edge://flags",
            "moz-extension://abcdef/popup.html",
        ] {
            let snapshot = PageSnapshot::complete(url, long_body());
            assert!(
                !is_supported(&snapshot, &ExtractorConfig::default()),
                "{} should be unsupported",
                url
            );
        }
    }

    #[test]
    fn test_loading_document_rejected() {
        let mut snapshot = PageSnapshot::complete("https://example.com", long_body());
        snapshot.readiness = Readiness::Loading;
        assert!(!is_supported(&snapshot, &ExtractorConfig::default()));
    }

    #[test]
    fn test_interactive_document_accepted() {
        let mut snapshot = PageSnapshot::complete("https://example.com", long_body());
        snapshot.readiness = Readiness::Interactive;
        assert!(is_supported(&snapshot, &ExtractorConfig::default()));
    }

    #[test]
    fn test_short_body_rejected() {
        let snapshot =
            PageSnapshot::complete("https://example.com", "<html><body>tiny</body></html>");
        assert!(!is_supported(&snapshot, &ExtractorConfig::default()));
    }

    #[test]
    fn test_unparseable_url_rejected() {
        let snapshot = PageSnapshot::complete("not a url", long_body());
        assert!(!is_supported(&snapshot, &ExtractorConfig::default()));
    }
}
