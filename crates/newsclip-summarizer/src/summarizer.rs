//! Summarizer facade tying prompts, provider, and parsing together

use crate::error::{ProviderError, SummarizeError};
use crate::parser::{parse_block_reply, parse_mode_reply, ModeSummary};
use crate::prompt::{mode_prompt, persona_prompt, MODE_SYSTEM, PERSONA_SYSTEM};
use crate::provider::{CompletionProvider, CompletionRequest};
use newsclip_domain::{Persona, SummaryMode, SummaryResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Sampling temperature for all summarization calls
pub const TEMPERATURE: f32 = 0.7;

/// Output token ceiling for the persona path
pub const PERSONA_MAX_TOKENS: u32 = 1000;

/// Output token ceiling for the mode path
pub const MODE_MAX_TOKENS: u32 = 500;

/// gpt-4o-mini input rate, USD per 1k tokens
const INPUT_COST_PER_1K: f64 = 0.000_15;

/// gpt-4o-mini output rate, USD per 1k tokens
const OUTPUT_COST_PER_1K: f64 = 0.000_6;

/// Token and cost accounting for one call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    /// Input tokens consumed
    pub input_tokens: u64,

    /// Output tokens generated
    pub output_tokens: u64,

    /// Estimated cost in USD
    pub cost: f64,
}

impl Usage {
    fn from_tokens(input_tokens: u64, output_tokens: u64) -> Self {
        let cost = (input_tokens as f64 * INPUT_COST_PER_1K
            + output_tokens as f64 * OUTPUT_COST_PER_1K)
            / 1000.0;
        Self {
            input_tokens,
            output_tokens,
            cost,
        }
    }
}

/// Persona- and mode-based summarization over an injected provider.
pub struct Summarizer {
    provider: Arc<dyn CompletionProvider>,
}

impl Summarizer {
    /// Create a summarizer over the given provider
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Persona path: plain-text layout request, tolerant parsing.
    ///
    /// Fails only when the provider call itself fails; a malformed reply
    /// degrades to placeholder values instead.
    pub async fn summarize(
        &self,
        content: &str,
        title: &str,
        persona: Persona,
    ) -> Result<SummaryResult, ProviderError> {
        let prompt = persona_prompt(persona, title, content);
        debug!(persona = persona.as_str(), prompt_chars = prompt.len(), "persona summarize");

        let response = self
            .provider
            .complete(CompletionRequest {
                system: PERSONA_SYSTEM.to_string(),
                user: prompt,
                temperature: TEMPERATURE,
                max_tokens: PERSONA_MAX_TOKENS,
                json_mode: false,
            })
            .await?;

        let result = parse_block_reply(&response.content);
        info!(
            persona = persona.as_str(),
            lines = result.summary.len(),
            keywords = result.keywords.len(),
            "summary generated"
        );
        Ok(result)
    }

    /// Mode path: JSON-object request, strict parsing.
    pub async fn summarize_mode(
        &self,
        content: &str,
        mode: SummaryMode,
    ) -> Result<(ModeSummary, Usage), SummarizeError> {
        let prompt = mode_prompt(mode, content);

        let response = self
            .provider
            .complete(CompletionRequest {
                system: MODE_SYSTEM.to_string(),
                user: prompt,
                temperature: TEMPERATURE,
                max_tokens: MODE_MAX_TOKENS,
                json_mode: true,
            })
            .await?;

        let parsed = parse_mode_reply(&response.content, mode)?;
        let usage = Usage::from_tokens(response.prompt_tokens, response.completion_tokens);

        Ok((parsed, usage))
    }
}
