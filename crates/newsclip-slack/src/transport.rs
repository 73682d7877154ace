//! Webhook transport seam.
//!
//! The client never talks to the network directly; it goes through this
//! trait so tests can count calls and fake statuses.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport-level failure (connection, DNS, timeout)
#[derive(Debug, Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Status and body of a webhook reply
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// HTTP status code
    pub status: u16,

    /// Response body text
    pub body: String,
}

impl TransportReply {
    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One JSON POST to a webhook URL
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST the JSON body and return the reply
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError>;
}

/// Production transport over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(TransportReply { status, body })
    }
}

/// Mock transport for tests: fixed status, call counter, last body captured.
#[derive(Clone)]
pub struct MockTransport {
    status: u16,
    body: String,
    call_count: Arc<Mutex<usize>>,
    last_body: Arc<Mutex<Option<serde_json::Value>>>,
}

impl MockTransport {
    /// Create a mock replying 200 "ok"
    pub fn ok() -> Self {
        Self::with_status(200, "ok")
    }

    /// Create a mock replying with the given status and body
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            call_count: Arc::new(Mutex::new(0)),
            last_body: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of POSTs made through this transport
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent posted body, if any
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.last_body.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    async fn post_json(
        &self,
        _url: &str,
        body: &serde_json::Value,
    ) -> Result<TransportReply, TransportError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_body.lock().unwrap() = Some(body.clone());

        Ok(TransportReply {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls_and_captures_body() {
        let transport = MockTransport::ok();
        assert_eq!(transport.call_count(), 0);

        let body = serde_json::json!({"text": "hello"});
        let reply = transport.post_json("https://example", &body).await.unwrap();

        assert!(reply.is_success());
        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.last_body(), Some(body));
    }

    #[test]
    fn test_reply_success_range() {
        assert!(TransportReply { status: 204, body: String::new() }.is_success());
        assert!(!TransportReply { status: 404, body: String::new() }.is_success());
        assert!(!TransportReply { status: 500, body: String::new() }.is_success());
    }
}
