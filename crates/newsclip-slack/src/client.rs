//! Delivery client

use crate::error::DeliveryError;
use crate::message::{test_message, SlackMessage};
use crate::transport::{HttpTransport, WebhookTransport};
use std::sync::Arc;
use tracing::{debug, warn};

/// Required prefix for every Slack incoming-webhook URL
pub const WEBHOOK_PREFIX: &str = "https://hooks.slack.com/services/";

/// True when the URL carries the Slack incoming-webhook prefix
pub fn is_valid_webhook_url(url: &str) -> bool {
    url.starts_with(WEBHOOK_PREFIX)
}

/// Posts Block Kit messages to incoming webhooks.
pub struct SlackClient {
    transport: Arc<dyn WebhookTransport>,
}

impl SlackClient {
    /// Create a client over the production HTTP transport
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    /// Create a client over an injected transport
    pub fn with_transport(transport: Arc<dyn WebhookTransport>) -> Self {
        Self { transport }
    }

    /// Strict delivery path: validate, POST once, surface any failure.
    ///
    /// The URL prefix is checked before the transport is touched; a rejected
    /// message carries the response status and body text.
    pub async fn send(
        &self,
        webhook_url: &str,
        message: &SlackMessage,
    ) -> Result<(), DeliveryError> {
        if !is_valid_webhook_url(webhook_url) {
            return Err(DeliveryError::InvalidWebhookUrl);
        }

        let body = serde_json::to_value(message)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let reply = self
            .transport
            .post_json(webhook_url, &body)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if !reply.is_success() {
            return Err(DeliveryError::Rejected {
                status: reply.status,
                body: reply.body,
            });
        }

        debug!("message delivered");
        Ok(())
    }

    /// Simple path used by integration registration: any failure collapses
    /// to `false`.
    pub async fn send_test_message(&self, webhook_url: &str) -> bool {
        match self.send(webhook_url, &test_message()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "test message delivery failed");
                false
            }
        }
    }
}

impl Default for SlackClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{build_message, ClipPayload};
    use crate::transport::MockTransport;

    fn clip_message() -> SlackMessage {
        build_message(
            &ClipPayload {
                title: "T".to_string(),
                url: "https://example.com".to_string(),
                ..Default::default()
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_any_network_call() {
        let transport = Arc::new(MockTransport::ok());
        let client = SlackClient::with_transport(transport.clone());

        let result = client
            .send("https://evil.example.com/services/T0/B0/X", &clip_message())
            .await;

        assert!(matches!(result, Err(DeliveryError::InvalidWebhookUrl)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_delivery() {
        let transport = Arc::new(MockTransport::ok());
        let client = SlackClient::with_transport(transport.clone());

        let url = format!("{}T000/B000/XXX", WEBHOOK_PREFIX);
        client.send(&url, &clip_message()).await.unwrap();

        assert_eq!(transport.call_count(), 1);
        let body = transport.last_body().unwrap();
        assert!(body.get("blocks").is_some());
    }

    #[tokio::test]
    async fn test_rejected_delivery_carries_status_and_body() {
        let transport = Arc::new(MockTransport::with_status(404, "no_service"));
        let client = SlackClient::with_transport(transport);

        let url = format!("{}T000/B000/XXX", WEBHOOK_PREFIX);
        let result = client.send(&url, &clip_message()).await;

        match result {
            Err(DeliveryError::Rejected { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, "no_service");
            }
            other => panic!("expected Rejected, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_test_message_collapses_failure_to_false() {
        let failing = SlackClient::with_transport(Arc::new(MockTransport::with_status(500, "err")));
        let url = format!("{}T000/B000/XXX", WEBHOOK_PREFIX);
        assert!(!failing.send_test_message(&url).await);

        let ok = SlackClient::with_transport(Arc::new(MockTransport::ok()));
        assert!(ok.send_test_message(&url).await);
    }

    #[test]
    fn test_webhook_prefix_validation() {
        assert!(is_valid_webhook_url(
            "https://hooks.slack.com/services/T000/B000/XXX"
        ));
        assert!(!is_valid_webhook_url("https://hooks.slack.com/other"));
        assert!(!is_valid_webhook_url("http://hooks.slack.com/services/T0"));
        assert!(!is_valid_webhook_url(""));
    }
}
