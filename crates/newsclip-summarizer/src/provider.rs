//! Completion provider trait and test mock

use crate::error::ProviderError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One completion call: a system framing, a user prompt, and sampling knobs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System message framing the assistant
    pub system: String,

    /// User prompt
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token ceiling
    pub max_tokens: u32,

    /// Ask the provider for a JSON-object reply
    pub json_mode: bool,
}

/// Provider reply plus token accounting.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,

    /// Input tokens consumed
    pub prompt_tokens: u64,

    /// Output tokens generated
    pub completion_tokens: u64,
}

/// Boundary to the hosted completion API.
///
/// Implemented by `OpenAiProvider` for production and `MockProvider` for
/// tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion request
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, ProviderError>;
}

/// Deterministic mock provider.
///
/// Returns a pre-configured reply without any network call and counts
/// invocations, so tests can assert both content handling and that no call
/// was made at all.
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    fail: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock returning the given reply for every request
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock that fails every request
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        *self.call_count.lock().unwrap() += 1;

        if self.fail {
            return Err(ProviderError::Request("mock failure".to_string()));
        }

        Ok(CompletionResponse {
            content: self.response.clone(),
            prompt_tokens: 100,
            completion_tokens: 50,
        })
    }
}
