//! Main-content extraction.
//!
//! Selector-first with a length-validated fallback: known content containers
//! give precision, the longest-text scan gives recall on arbitrary sites,
//! without a full readability scoring pass.

use crate::config::ExtractorConfig;
use crate::snapshot::PageSnapshot;
use crate::text::{clean_content, count_words, truncate_chars};
use newsclip_domain::PageContent;
use scraper::{ElementRef, Html, Selector};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Content container selectors, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role=\"main\"]",
    ".article-content",
    ".post-content",
    ".entry-content",
    "#content",
    ".content",
];

/// Element names excluded from text collection
const NOISE_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Class names excluded from text collection
const NOISE_CLASSES: &[&str] = &[
    "advertisement",
    "ad",
    "social-share",
    "related-posts",
    "comments",
];

/// Extracts readable content from page snapshots.
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl ContentExtractor {
    /// Create an extractor with the given thresholds
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract readable content from the snapshot.
    ///
    /// Returns `None` when no suitable content is found; that is a normal
    /// outcome for exotic page structures, not a fault. The snapshot is never
    /// mutated.
    pub fn extract(&self, snapshot: &PageSnapshot) -> Option<PageContent> {
        let document = Html::parse_document(&snapshot.html);

        let title = extract_title(&document);
        let metadata = extract_metadata(&document);

        let main = self.find_main_content(&document)?;
        let raw = collect_text(main);
        let cleaned = clean_content(&raw);
        let content = truncate_chars(&cleaned, self.config.content_max);
        let word_count = count_words(&content);

        debug!(
            title = %title,
            chars = content.len(),
            words = word_count,
            "content extracted"
        );

        Some(PageContent {
            url: snapshot.url.clone(),
            title,
            content,
            excerpt: metadata.excerpt,
            author: metadata.author,
            published_date: metadata.published_date,
            word_count,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_secs(),
        })
    }

    /// Find the main content element: priority selectors first, then the
    /// longest-text fallback over generic block containers.
    fn find_main_content<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        for selector_str in CONTENT_SELECTORS {
            let selector = Selector::parse(selector_str).unwrap();
            if let Some(element) = document.select(&selector).next() {
                if self.is_valid_content(element) {
                    debug!(selector = selector_str, "content selector matched");
                    return Some(element);
                }
            }
        }

        self.find_longest_text_element(document)
    }

    /// A candidate is valid once its cleaned text clears the boilerplate
    /// threshold.
    fn is_valid_content(&self, element: ElementRef<'_>) -> bool {
        collect_text(element).trim().len() > self.config.valid_content_len
    }

    /// Fallback: the generic block container with the longest cleaned text,
    /// provided it clears the same threshold.
    fn find_longest_text_element<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let candidates = Selector::parse("div, section, article").unwrap();
        let mut longest: Option<ElementRef<'a>> = None;
        let mut max_len = 0usize;

        for element in document.select(&candidates) {
            let len = collect_text(element).trim().len();
            if len > max_len {
                max_len = len;
                longest = Some(element);
            }
        }

        if max_len > self.config.valid_content_len {
            longest
        } else {
            None
        }
    }
}

/// Title priority: Open Graph, then Twitter card, then `<title>`, else
/// "Untitled". First non-empty wins.
fn extract_title(document: &Html) -> String {
    if let Some(title) = meta_content(document, "meta[property=\"og:title\"]") {
        return title;
    }
    if let Some(title) = meta_content(document, "meta[name=\"twitter:title\"]") {
        return title;
    }

    let title_selector = Selector::parse("title").unwrap();
    document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

struct PageMetadata {
    author: Option<String>,
    published_date: Option<String>,
    excerpt: Option<String>,
}

/// Probe document metadata. Each field is independent and optional.
fn extract_metadata(document: &Html) -> PageMetadata {
    let author = meta_content(document, "meta[name=\"author\"]")
        .or_else(|| meta_content(document, "meta[property=\"article:author\"]"));

    let published_date = meta_content(document, "meta[property=\"article:published_time\"]")
        .or_else(|| meta_content(document, "meta[name=\"date\"]"));

    let excerpt = meta_content(document, "meta[name=\"description\"]")
        .or_else(|| meta_content(document, "meta[property=\"og:description\"]"));

    PageMetadata {
        author,
        published_date,
        excerpt,
    }
}

/// First non-empty `content` attribute matching the selector
fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collect descendant text, skipping noise subtrees entirely. Traversal is
/// read-only; the parsed document is left untouched.
fn collect_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_into(element, &mut out);
    out
}

fn collect_into(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_noise(child_element) {
                collect_into(child_element, out);
            }
        }
    }
}

fn is_noise(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if NOISE_TAGS.contains(&value.name()) {
        return true;
    }
    value.classes().any(|class| NOISE_CLASSES.contains(&class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::PageSnapshot;

    fn article_html() -> String {
        format!(
            r#"<html>
<head>
  <title>Document Title</title>
  <meta property="og:title" content="OG Title">
  <meta name="author" content="Jane Doe">
  <meta property="article:published_time" content="2025-03-01T09:00:00Z">
  <meta name="description" content="A short description.">
</head>
<body>
  <nav>Home About Contact</nav>
  <article>
    <h1>Heading</h1>
    <p>{}</p>
    <div class="ad">BUY NOW BUY NOW</div>
    <aside>Unrelated sidebar chatter</aside>
  </article>
  <footer>Copyright notice</footer>
</body>
</html>"#,
            "The quick brown fox jumps over the lazy dog. ".repeat(10)
        )
    }

    fn extract(html: &str) -> Option<PageContent> {
        let snapshot = PageSnapshot::complete("https://example.com/post", html);
        ContentExtractor::default().extract(&snapshot)
    }

    #[test]
    fn test_og_title_wins_over_document_title() {
        let content = extract(&article_html()).unwrap();
        assert_eq!(content.title, "OG Title");
    }

    #[test]
    fn test_falls_back_to_document_title() {
        let html = format!(
            "<html><head><title>Doc Title</title></head><body><article><p>{}</p></article></body></html>",
            "word ".repeat(100)
        );
        let content = extract(&html).unwrap();
        assert_eq!(content.title, "Doc Title");
    }

    #[test]
    fn test_untitled_when_no_title_anywhere() {
        let html = format!(
            "<html><body><article><p>{}</p></article></body></html>",
            "word ".repeat(100)
        );
        let content = extract(&html).unwrap();
        assert_eq!(content.title, "Untitled");
    }

    #[test]
    fn test_metadata_probes() {
        let content = extract(&article_html()).unwrap();
        assert_eq!(content.author.as_deref(), Some("Jane Doe"));
        assert_eq!(
            content.published_date.as_deref(),
            Some("2025-03-01T09:00:00Z")
        );
        assert_eq!(content.excerpt.as_deref(), Some("A short description."));
    }

    #[test]
    fn test_noise_elements_are_excluded() {
        let content = extract(&article_html()).unwrap();
        assert!(!content.content.contains("BUY NOW"));
        assert!(!content.content.contains("sidebar chatter"));
        assert!(content.content.contains("quick brown fox"));
    }

    #[test]
    fn test_nav_and_footer_outside_article_ignored() {
        let content = extract(&article_html()).unwrap();
        assert!(!content.content.contains("Home About Contact"));
        assert!(!content.content.contains("Copyright notice"));
    }

    #[test]
    fn test_fallback_to_longest_block() {
        // No semantic containers; two divs, the longer one must win.
        let html = format!(
            "<html><body><div>short filler text</div><div>{}</div></body></html>",
            "the long candidate paragraph keeps going. ".repeat(20)
        );
        let content = extract(&html).unwrap();
        assert!(content.content.contains("long candidate paragraph"));
        assert!(!content.content.starts_with("short filler"));
    }

    #[test]
    fn test_extraction_fails_when_nothing_clears_threshold() {
        let html = "<html><body><div>too short</div></body></html>";
        assert!(extract(html).is_none());
    }

    #[test]
    fn test_boilerplate_container_rejected_in_favor_of_fallback() {
        // A nav wrapped in a .content div is below the validity threshold,
        // so the selector candidate loses to the longest-text fallback.
        let html = format!(
            "<html><body><div class=\"content\"><nav>menu menu</nav></div><section>{}</section></body></html>",
            "actual readable body text here. ".repeat(20)
        );
        let content = extract(&html).unwrap();
        assert!(content.content.contains("actual readable body"));
    }

    #[test]
    fn test_content_capped_at_configured_max() {
        let html = format!(
            "<html><body><article><p>{}</p></article></body></html>",
            "word ".repeat(5_000)
        );
        let content = extract(&html).unwrap();
        assert!(content.content.chars().count() <= newsclip_domain::limits::CONTENT_MAX);
    }

    #[test]
    fn test_word_count_matches_returned_content() {
        let html = format!(
            "<html><body><article><p>{}</p></article></body></html>",
            "alpha beta gamma ".repeat(100)
        );
        let content = extract(&html).unwrap();
        assert_eq!(content.word_count, content.content.split_whitespace().count());
    }

    #[test]
    fn test_extraction_does_not_mutate_snapshot() {
        let html = article_html();
        let snapshot = PageSnapshot::complete("https://example.com/post", html.clone());
        let extractor = ContentExtractor::default();

        let first = extractor.extract(&snapshot).map(|c| (c.title, c.content));
        let second = extractor.extract(&snapshot).map(|c| (c.title, c.content));

        assert_eq!(snapshot.html, html);
        assert_eq!(first, second);
    }

    #[test]
    fn test_whitespace_normalized() {
        let html = format!(
            "<html><body><article><p>spaced    out\t\ttext {}</p></article></body></html>",
            "pad ".repeat(100)
        );
        let content = extract(&html).unwrap();
        assert!(content.content.contains("spaced out text"));
    }
}
