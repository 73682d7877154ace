//! Reply parsing for both summarization paths.
//!
//! The block parser is tolerant: the provider mostly but not always follows
//! the requested layout, so missing sections degrade to placeholder values
//! and parsing never fails. The JSON parser is strict: there the prompt
//! controls the output format (provider JSON mode), so a malformed reply is
//! a hard error.

use crate::error::SummarizeError;
use newsclip_domain::{SummaryMode, SummaryResult};
use serde::Deserialize;

/// Placeholder summary line when no bulleted lines were found
pub const PLACEHOLDER_SUMMARY: &str = "Unable to generate a summary.";

/// Placeholder keyword when the keywords block was empty or missing
pub const PLACEHOLDER_KEYWORD: &str = "keyword";

/// Placeholder insight when the insight block was empty or missing
pub const PLACEHOLDER_INSIGHT: &str = "No insight could be generated.";

/// Parse a `SUMMARY:/KEYWORDS:/INSIGHT:` reply tolerantly.
///
/// Anchored region extraction, not natural-language understanding: the
/// summary region runs from `SUMMARY:` to `KEYWORDS:`, the keywords region
/// from `KEYWORDS:` to `INSIGHT:`, and the remainder is the insight. Any
/// region that comes up empty is substituted with a placeholder.
pub fn parse_block_reply(reply: &str) -> SummaryResult {
    let summary_text = region(reply, "SUMMARY:", Some("KEYWORDS:"));
    let keywords_text = region(reply, "KEYWORDS:", Some("INSIGHT:"));
    let insight_text = region(reply, "INSIGHT:", None);

    let summary: Vec<String> = summary_text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches('-').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let keywords: Vec<String> = keywords_text
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    let insight = insight_text.trim().to_string();

    SummaryResult {
        summary: if summary.is_empty() {
            vec![PLACEHOLDER_SUMMARY.to_string()]
        } else {
            summary
        },
        keywords: if keywords.is_empty() {
            vec![PLACEHOLDER_KEYWORD.to_string()]
        } else {
            keywords
        },
        insight: if insight.is_empty() {
            PLACEHOLDER_INSIGHT.to_string()
        } else {
            insight
        },
    }
}

/// Text between `start` and `end` anchors; empty when either anchor is
/// missing (for a `None` end, everything after `start`).
fn region<'a>(reply: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let Some(start_idx) = reply.find(start) else {
        return "";
    };
    let after = &reply[start_idx + start.len()..];

    match end {
        Some(end_marker) => match after.find(end_marker) {
            Some(end_idx) => &after[..end_idx],
            None => "",
        },
        None => after,
    }
}

/// Result of the strict-JSON mode path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSummary {
    /// Summary lines (mode `summary`) or the keyword list (mode `keywords`)
    pub summary: Vec<String>,

    /// Keywords, regardless of mode
    pub keywords: Vec<String>,

    /// Insight line, possibly empty
    pub insight: String,
}

#[derive(Deserialize)]
struct ModeReply {
    #[serde(default)]
    summary: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    insight: String,
}

/// Parse the strict-JSON reply. A reply that is not a JSON object of the
/// requested shape is a [`SummarizeError::Parse`].
pub fn parse_mode_reply(reply: &str, mode: SummaryMode) -> Result<ModeSummary, SummarizeError> {
    let parsed: ModeReply =
        serde_json::from_str(reply).map_err(|e| SummarizeError::Parse(e.to_string()))?;

    let summary = match mode {
        SummaryMode::Summary => parsed.summary,
        SummaryMode::Keywords => parsed.keywords.clone(),
    };

    Ok(ModeSummary {
        summary,
        keywords: parsed.keywords,
        insight: parsed.insight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "SUMMARY:\n\
        - Company X announced a new product line.\n\
        - The launch targets enterprise customers.\n\
        - Analysts expect strong quarterly impact.\n\
        \n\
        KEYWORDS:\n\
        launch, enterprise, product, quarterly, analysts\n\
        \n\
        INSIGHT:\n\
        The announcement signals a strategic shift upmarket.";

    #[test]
    fn test_well_formed_reply_uses_no_placeholders() {
        let result = parse_block_reply(WELL_FORMED);

        assert_eq!(
            result.summary,
            vec![
                "Company X announced a new product line.",
                "The launch targets enterprise customers.",
                "Analysts expect strong quarterly impact.",
            ]
        );
        assert_eq!(
            result.keywords,
            vec!["launch", "enterprise", "product", "quarterly", "analysts"]
        );
        assert_eq!(
            result.insight,
            "The announcement signals a strategic shift upmarket."
        );
    }

    #[test]
    fn test_missing_keywords_marker_degrades_to_placeholder() {
        let reply = "SUMMARY:\n- only line\n\nINSIGHT:\nsomething";
        let result = parse_block_reply(reply);

        assert_eq!(result.keywords, vec![PLACEHOLDER_KEYWORD]);
        // Summary region needs the KEYWORDS anchor too, so it degrades as well
        assert_eq!(result.summary, vec![PLACEHOLDER_SUMMARY]);
        assert_eq!(result.insight, "something");
    }

    #[test]
    fn test_garbage_reply_degrades_everywhere_and_never_errors() {
        let result = parse_block_reply("complete nonsense with no markers at all");

        assert_eq!(result.summary, vec![PLACEHOLDER_SUMMARY]);
        assert_eq!(result.keywords, vec![PLACEHOLDER_KEYWORD]);
        assert_eq!(result.insight, PLACEHOLDER_INSIGHT);
    }

    #[test]
    fn test_non_bulleted_summary_lines_are_ignored() {
        let reply = "SUMMARY:\nHere is your summary:\n- the real line\n\nKEYWORDS:\nk1\n\nINSIGHT:\ni";
        let result = parse_block_reply(reply);
        assert_eq!(result.summary, vec!["the real line"]);
    }

    #[test]
    fn test_keyword_entries_trimmed_and_empties_dropped() {
        let reply = "SUMMARY:\n- s\n\nKEYWORDS:\n a ,  b ,, c \n\nINSIGHT:\ni";
        let result = parse_block_reply(reply);
        assert_eq!(result.keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mode_reply_summary() {
        let reply = r#"{"summary": ["l1", "l2", "l3"], "keywords": ["k1", "k2"], "insight": "i"}"#;
        let parsed = parse_mode_reply(reply, SummaryMode::Summary).unwrap();
        assert_eq!(parsed.summary, vec!["l1", "l2", "l3"]);
        assert_eq!(parsed.keywords, vec!["k1", "k2"]);
        assert_eq!(parsed.insight, "i");
    }

    #[test]
    fn test_mode_reply_keywords_mode_surfaces_keywords_as_summary() {
        let reply = r#"{"keywords": ["k1", "k2"], "insight": "i"}"#;
        let parsed = parse_mode_reply(reply, SummaryMode::Keywords).unwrap();
        assert_eq!(parsed.summary, vec!["k1", "k2"]);
        assert_eq!(parsed.keywords, vec!["k1", "k2"]);
    }

    #[test]
    fn test_mode_reply_malformed_json_is_a_hard_error() {
        let result = parse_mode_reply("not json at all", SummaryMode::Summary);
        assert!(matches!(result, Err(SummarizeError::Parse(_))));
    }

    #[test]
    fn test_mode_reply_missing_fields_default_empty() {
        let parsed = parse_mode_reply("{}", SummaryMode::Summary).unwrap();
        assert!(parsed.summary.is_empty());
        assert!(parsed.keywords.is_empty());
        assert_eq!(parsed.insight, "");
    }
}
