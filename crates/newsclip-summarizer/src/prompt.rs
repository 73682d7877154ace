//! Prompt templates for both summarization paths

use newsclip_domain::{Persona, SummaryMode};

/// System framing for the persona path
pub const PERSONA_SYSTEM: &str = "You are a web content summarization expert. \
Summarize accurately and concisely, and follow the requested format exactly.";

/// System framing for the strict-JSON mode path
pub const MODE_SYSTEM: &str = "You are a professional content summarization \
expert. You always respond in JSON format only.";

/// Maximum content characters embedded into a mode prompt
pub const MODE_CONTENT_MAX: usize = 5000;

const FORMAT_BLOCK: &str = r#"Respond in exactly this format:
SUMMARY:
- first summary line
- second summary line
- third summary line

KEYWORDS:
keyword1, keyword2, keyword3, keyword4, keyword5

INSIGHT:
insight line"#;

/// Build the persona-specific prompt embedding title and content.
///
/// Every persona requests the same three-section layout; only the framing
/// changes.
pub fn persona_prompt(persona: Persona, title: &str, content: &str) -> String {
    let framing = match persona {
        Persona::General => {
            "Analyze and summarize the following web page content:\n\
             1. Three-line summary: the core content in three lines\n\
             2. Keywords: five key keywords (comma separated)\n\
             3. Insight: the takeaway or most important point of this content"
        }
        Persona::Marketing => {
            "Analyze the following web page content from a marketing expert's perspective:\n\
             1. Three-line summary: the core content from a marketing standpoint\n\
             2. Keywords: five marketing-related keywords\n\
             3. Insight: marketing strategy, target audience, and market-trend takeaways"
        }
        Persona::Dev => {
            "Analyze the following web page content from a developer's perspective:\n\
             1. Three-line summary: the technical core of the content\n\
             2. Keywords: five keywords on stack, frameworks, or methodology\n\
             3. Insight: technical takeaways, implementation ideas, architecture angles"
        }
        Persona::Biz => {
            "Analyze the following web page content from a business expert's perspective:\n\
             1. Three-line summary: the core content from a business standpoint\n\
             2. Keywords: five keywords on business model, strategy, or monetization\n\
             3. Insight: business opportunities, market analysis, strategic takeaways"
        }
    };

    format!(
        "{framing}\n\nTitle: {title}\n\nContent:\n{content}\n\n{FORMAT_BLOCK}"
    )
}

/// Build the strict-JSON prompt for the single-endpoint mode variant.
///
/// Content is capped before embedding; the reply contract is a JSON object.
pub fn mode_prompt(mode: SummaryMode, content: &str) -> String {
    let capped: String = content.chars().take(MODE_CONTENT_MAX).collect();

    match mode {
        SummaryMode::Summary => format!(
            "Summarize the following web page content in three lines or fewer.\n\n\
             Summary rules:\n\
             1. Focus on core information and insight\n\
             2. Drop filler wording\n\
             3. Prioritize content with business value\n\
             4. Write each line as a complete sentence\n\n\
             Response fields:\n\
             - summary: array of 3 summary lines\n\
             - keywords: array of 5 key keywords\n\
             - insight: one takeaway line\n\n\
             Respond with JSON only.\n\n\
             Page content:\n{capped}\n\nJSON response:"
        ),
        SummaryMode::Keywords => format!(
            "Extract the five key keywords from the following text.\n\n\
             Text:\n{capped}\n\n\
             Response fields:\n\
             - keywords: array of keywords (5)\n\
             - insight: one short takeaway line\n\n\
             Respond with JSON only.\n\nJSON response:"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_prompt_embeds_title_and_content() {
        let prompt = persona_prompt(Persona::General, "My Title", "Body text here");
        assert!(prompt.contains("My Title"));
        assert!(prompt.contains("Body text here"));
        assert!(prompt.contains("SUMMARY:"));
        assert!(prompt.contains("KEYWORDS:"));
        assert!(prompt.contains("INSIGHT:"));
    }

    #[test]
    fn test_each_persona_changes_the_framing_only() {
        let prompts: Vec<String> = [
            Persona::General,
            Persona::Marketing,
            Persona::Dev,
            Persona::Biz,
        ]
        .iter()
        .map(|p| persona_prompt(*p, "T", "C"))
        .collect();

        // All request the same layout
        for prompt in &prompts {
            assert!(prompt.contains("Respond in exactly this format"));
        }
        // But the framings differ
        assert!(prompts[1].contains("marketing expert"));
        assert!(prompts[2].contains("developer's perspective"));
        assert!(prompts[3].contains("business expert"));
    }

    #[test]
    fn test_mode_prompt_caps_content() {
        let oversized = "x".repeat(MODE_CONTENT_MAX * 2);
        let prompt = mode_prompt(SummaryMode::Summary, &oversized);
        assert!(prompt.len() < oversized.len());
    }

    #[test]
    fn test_keywords_mode_asks_for_keywords_only() {
        let prompt = mode_prompt(SummaryMode::Keywords, "some text");
        assert!(prompt.contains("five key keywords"));
        assert!(!prompt.contains("array of 3 summary lines"));
    }
}
