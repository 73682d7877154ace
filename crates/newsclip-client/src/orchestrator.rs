//! Extraction orchestrator.
//!
//! Drives one request through classify-then-extract and maps the result to
//! exactly one terminal outcome. No retries, no partial responses; a second
//! request simply re-runs the pipeline from scratch (extraction is
//! idempotent and side-effect-free).

use crate::messages::{ExtractOutcome, ExtractRequest};
use newsclip_extractor::{is_supported, ContentExtractor, ExtractorConfig};
use tracing::debug;

/// Notice shown when extraction finds nothing usable
const EXTRACTION_FAILED_NOTICE: &str =
    "Could not extract readable content from this page. Please try a different page.";

/// Classifier gate plus extractor, behind the message boundary.
pub struct ExtractionOrchestrator {
    config: ExtractorConfig,
    extractor: ContentExtractor,
}

impl ExtractionOrchestrator {
    /// Create an orchestrator with the given thresholds
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            extractor: ContentExtractor::new(config.clone()),
            config,
        }
    }

    /// Handle one extraction request to its terminal outcome.
    pub fn handle(&self, request: ExtractRequest) -> ExtractOutcome {
        let ExtractRequest::ExtractContent { snapshot } = request;

        debug!(url = %snapshot.url, "classifying");
        if !is_supported(&snapshot, &self.config) {
            return ExtractOutcome::UnsupportedPage;
        }

        debug!(url = %snapshot.url, "extracting");
        match self.extractor.extract(&snapshot) {
            Some(payload) => ExtractOutcome::ContentExtracted { payload },
            // A page with no usable content is a normal outcome, reported as
            // a user-facing notice rather than a fault
            None => ExtractOutcome::Error {
                error: EXTRACTION_FAILED_NOTICE.to_string(),
            },
        }
    }
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsclip_extractor::PageSnapshot;

    fn handle(url: &str, html: &str) -> ExtractOutcome {
        ExtractionOrchestrator::default().handle(ExtractRequest::ExtractContent {
            snapshot: PageSnapshot::complete(url, html),
        })
    }

    #[test]
    fn test_supported_page_yields_payload() {
        let html = format!(
            "<html><head><title>T</title></head><body><article><p>{}</p></article></body></html>",
            "plenty of readable words here. ".repeat(20)
        );
        let outcome = handle("https://example.com/post", &html);

        match outcome {
            ExtractOutcome::ContentExtracted { payload } => {
                assert_eq!(payload.title, "T");
                assert!(payload.word_count > 0);
            }
            other => panic!("expected ContentExtracted, got {:?}", other),
        }
    }

    #[test]
    fn test_internal_page_is_unsupported() {
        let html = format!(
            "<html><body><article><p>{}</p></article></body></html>",
            "text ".repeat(100)
        );
        let outcome = handle("chrome://settings", &html);
        assert!(matches!(outcome, ExtractOutcome::UnsupportedPage));
    }

    #[test]
    fn test_sparse_page_is_unsupported() {
        let outcome = handle("https://example.com", "<html><body>tiny</body></html>");
        assert!(matches!(outcome, ExtractOutcome::UnsupportedPage));
    }

    #[test]
    fn test_no_content_container_is_an_error_notice() {
        // Enough body text to pass the classifier, spread thin so no single
        // container clears the validity threshold
        let spans = "<p>twelve chars</p>".repeat(20);
        let html = format!("<html><body>{}</body></html>", spans);
        let outcome = handle("https://example.com", &html);
        assert!(matches!(outcome, ExtractOutcome::Error { .. }));
    }

    #[test]
    fn test_reruns_are_deterministic() {
        let html = format!(
            "<html><body><article><p>{}</p></article></body></html>",
            "stable content for reruns. ".repeat(20)
        );
        let orchestrator = ExtractionOrchestrator::default();
        let request = || ExtractRequest::ExtractContent {
            snapshot: PageSnapshot::complete("https://example.com", html.clone()),
        };

        let first = orchestrator.handle(request());
        let second = orchestrator.handle(request());

        match (first, second) {
            (
                ExtractOutcome::ContentExtracted { payload: a },
                ExtractOutcome::ContentExtracted { payload: b },
            ) => {
                assert_eq!(a.content, b.content);
                assert_eq!(a.word_count, b.word_count);
            }
            other => panic!("expected two ContentExtracted outcomes, got {:?}", other),
        }
    }
}
