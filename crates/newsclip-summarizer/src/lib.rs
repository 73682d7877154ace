//! Newsclip Summarization Layer
//!
//! Builds persona-specific prompts, calls a hosted completion provider, and
//! parses the reply into `{summary, keywords, insight}`.
//!
//! Two parsing strategies coexist on purpose:
//!
//! - The persona path requests a plain-text `SUMMARY:/KEYWORDS:/INSIGHT:`
//!   layout and parses it tolerantly - malformed replies degrade to
//!   placeholder values and never fail.
//! - The mode path requests strict JSON output (the provider is put in JSON
//!   mode) and a malformed reply is a hard parse error.
//!
//! # Providers
//!
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `MockProvider`: deterministic mock for testing, with a call counter

#![warn(missing_docs)]

pub mod error;
pub mod openai;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod summarizer;

pub use error::{ProviderError, SummarizeError};
pub use openai::OpenAiProvider;
pub use parser::ModeSummary;
pub use provider::{CompletionProvider, CompletionRequest, CompletionResponse, MockProvider};
pub use summarizer::{Summarizer, Usage};
