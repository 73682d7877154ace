//! Block Kit message construction.
//!
//! Block ordering is fixed: header, URL section, divider, summary, keywords,
//! insight, optional comment, footer. Optional blocks are omitted entirely
//! when their source field is absent or empty.

use chrono::Utc;
use newsclip_domain::Persona;
use serde::Serialize;

/// Product name stamped into the message footer
pub const PRODUCT_NAME: &str = "Newsclip";

/// Slack text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    /// Plain text (headers)
    PlainText {
        /// Text content
        text: String,
        /// Allow emoji shortcodes
        emoji: bool,
    },

    /// Slack-flavored markdown (sections, context)
    Mrkdwn {
        /// Text content
        text: String,
    },
}

impl TextObject {
    fn plain(text: impl Into<String>) -> Self {
        TextObject::PlainText {
            text: text.into(),
            emoji: true,
        }
    }

    fn mrkdwn(text: impl Into<String>) -> Self {
        TextObject::Mrkdwn { text: text.into() }
    }
}

/// Slack layout block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Header block
    Header {
        /// Header text
        text: TextObject,
    },

    /// Section block
    Section {
        /// Section text
        text: TextObject,
    },

    /// Divider block
    Divider,

    /// Context block (footer)
    Context {
        /// Context elements
        elements: Vec<TextObject>,
    },
}

/// Complete webhook message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    /// Notification fallback text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Ordered layout blocks
    pub blocks: Vec<Block>,
}

/// Source material for one clip message
#[derive(Debug, Clone, Default)]
pub struct ClipPayload {
    /// Page title
    pub title: String,

    /// Page URL
    pub url: String,

    /// Summary lines
    pub summary: Vec<String>,

    /// Keywords
    pub keywords: Vec<String>,

    /// Insight line
    pub insight: Option<String>,

    /// Persona label for the summary section
    pub persona: Option<Persona>,
}

/// Build the ordered block list for a clip.
pub fn build_message(payload: &ClipPayload, comment: Option<&str>) -> SlackMessage {
    let title = if payload.title.is_empty() {
        "Untitled"
    } else {
        &payload.title
    };

    let mut blocks = vec![
        Block::Header {
            text: TextObject::plain(title),
        },
        Block::Section {
            text: TextObject::mrkdwn(format!("🔗 *URL:* {}", payload.url)),
        },
        Block::Divider,
    ];

    if !payload.summary.is_empty() {
        let lines = payload
            .summary
            .iter()
            .map(|line| format!("• {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        let heading = match payload.persona {
            Some(persona) => format!("*📝 Summary ({} view)*", persona.as_str()),
            None => "*📝 Summary*".to_string(),
        };
        blocks.push(Block::Section {
            text: TextObject::mrkdwn(format!("{}\n{}", heading, lines)),
        });
    }

    if !payload.keywords.is_empty() {
        blocks.push(Block::Section {
            text: TextObject::mrkdwn(format!(
                "*🏷️ Keywords:* {}",
                payload.keywords.join(", ")
            )),
        });
    }

    if let Some(insight) = payload.insight.as_deref().filter(|i| !i.is_empty()) {
        blocks.push(Block::Section {
            text: TextObject::mrkdwn(format!("*💡 Insight*\n{}", insight)),
        });
    }

    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        blocks.push(Block::Divider);
        blocks.push(Block::Section {
            text: TextObject::mrkdwn(format!("*💬 Comment*\n{}", comment)),
        });
    }

    blocks.push(Block::Context {
        elements: vec![TextObject::mrkdwn(format!(
            "📅 {} | 🤖 {}",
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
            PRODUCT_NAME
        ))],
    });

    SlackMessage {
        text: None,
        blocks,
    }
}

/// Short confirmation message posted when an integration is registered.
pub fn test_message() -> SlackMessage {
    SlackMessage {
        text: Some(format!("🎉 {} connected!", PRODUCT_NAME)),
        blocks: vec![Block::Section {
            text: TextObject::mrkdwn(format!(
                "*{}* was connected successfully!\n\nYou can now summarize web content and share it to Slack.",
                PRODUCT_NAME
            )),
        }],
    }
}
