//! Summarization result

use serde::{Deserialize, Serialize};

/// Structured output of one summarization call.
///
/// Each field is independently editable by the user before delivery; an edit
/// to one field preserves the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Ordered summary lines (canonically 3)
    pub summary: Vec<String>,

    /// Ordered keywords (canonically 5)
    pub keywords: Vec<String>,

    /// Single insight line
    pub insight: String,
}

impl SummaryResult {
    /// Flatten the summary lines into one newline-joined string for storage
    pub fn summary_text(&self) -> String {
        self.summary.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text_joins_lines() {
        let result = SummaryResult {
            summary: vec!["one".to_string(), "two".to_string()],
            keywords: vec!["kw".to_string()],
            insight: "insight".to_string(),
        };
        assert_eq!(result.summary_text(), "one\ntwo");
    }
}
