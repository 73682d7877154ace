//! HTTP client for the server API.
//!
//! Thin typed wrapper over the endpoints; owner-scoped calls require a
//! session token and fail locally (no network) without one.

use crate::error::ClientError;
use newsclip_domain::{Integration, Persona, Scrap, SummaryMode, User};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error envelope shared by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    jwt: String,
    user: User,
}

/// Summarize endpoint payload
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeData {
    /// Summary lines (or keywords, in keywords mode)
    pub summary: Vec<String>,

    /// Keywords
    pub keywords: Vec<String>,

    /// Insight line
    pub insight: String,

    /// Server-side processing time in seconds
    #[serde(rename = "processingTime")]
    pub processing_time: f64,
}

#[derive(Debug, Deserialize)]
struct SummarizeEnvelope {
    data: SummarizeData,
}

#[derive(Debug, Deserialize)]
struct IntegrationsEnvelope {
    integrations: Vec<Integration>,
}

#[derive(Debug, Deserialize)]
struct IntegrationEnvelope {
    integration: Integration,
}

#[derive(Debug, Deserialize)]
struct ScrapsEnvelope {
    scraps: Vec<Scrap>,
}

#[derive(Debug, Deserialize)]
struct ScrapEnvelope {
    scrap: Scrap,
}

/// Direct Slack delivery arguments
#[derive(Debug, Clone, Serialize)]
pub struct SendSlackArgs {
    /// Webhook destination
    #[serde(rename = "webhookUrl")]
    pub webhook_url: String,

    /// Page title
    pub title: String,

    /// Page URL
    pub url: String,

    /// Summary lines
    pub summary: Vec<String>,

    /// Keywords
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Insight line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,

    /// User comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Typed client for the server endpoints.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    jwt: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into(),
            client,
            jwt: None,
        }
    }

    /// Attach a session token for owner-scoped calls
    pub fn with_token(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// Whether a session token is attached
    pub fn is_authenticated(&self) -> bool {
        self.jwt.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.jwt.as_deref().ok_or(ClientError::NotAuthenticated)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))
    }

    /// POST /auth/login - exchange an identity token for a session
    pub async fn login(&self, google_token: &str) -> Result<(User, String), ClientError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({"googleToken": google_token}))
            .send()
            .await?;

        let envelope: LoginEnvelope = Self::decode(response).await?;
        Ok((envelope.user, envelope.jwt))
    }

    /// POST /summarize - strict-JSON summarization
    pub async fn summarize(
        &self,
        content: &str,
        title: &str,
        url: &str,
        mode: SummaryMode,
    ) -> Result<SummarizeData, ClientError> {
        let response = self
            .client
            .post(self.url("/summarize"))
            .json(&json!({
                "content": content,
                "title": title,
                "url": url,
                "mode": mode.as_str(),
            }))
            .send()
            .await?;

        let envelope: SummarizeEnvelope = Self::decode(response).await?;
        Ok(envelope.data)
    }

    /// POST /send-slack - direct delivery
    pub async fn send_slack(&self, args: &SendSlackArgs) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url("/send-slack"))
            .json(args)
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// GET /integrations
    pub async fn list_integrations(&self) -> Result<Vec<Integration>, ClientError> {
        let response = self
            .client
            .get(self.url("/integrations"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let envelope: IntegrationsEnvelope = Self::decode(response).await?;
        Ok(envelope.integrations)
    }

    /// POST /integrations
    pub async fn create_integration(
        &self,
        webhook_url: &str,
        workspace_name: Option<&str>,
    ) -> Result<Integration, ClientError> {
        let response = self
            .client
            .post(self.url("/integrations"))
            .bearer_auth(self.bearer()?)
            .json(&json!({
                "webhook_url": webhook_url,
                "workspace_name": workspace_name,
            }))
            .send()
            .await?;

        let envelope: IntegrationEnvelope = Self::decode(response).await?;
        Ok(envelope.integration)
    }

    /// PATCH /integrations/{id}
    pub async fn set_integration_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Integration, ClientError> {
        let response = self
            .client
            .patch(self.url(&format!("/integrations/{}", id)))
            .bearer_auth(self.bearer()?)
            .json(&json!({"is_active": is_active}))
            .send()
            .await?;

        let envelope: IntegrationEnvelope = Self::decode(response).await?;
        Ok(envelope.integration)
    }

    /// DELETE /integrations/{id}
    pub async fn delete_integration(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/integrations/{}", id)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// GET /scraps
    pub async fn list_scraps(&self) -> Result<Vec<Scrap>, ClientError> {
        let response = self
            .client
            .get(self.url("/scraps"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let envelope: ScrapsEnvelope = Self::decode(response).await?;
        Ok(envelope.scraps)
    }

    /// POST /scraps - summarize and persist in one call
    pub async fn create_scrap(
        &self,
        url: &str,
        title: &str,
        content: &str,
        persona: Persona,
        word_count: Option<i64>,
    ) -> Result<Scrap, ClientError> {
        let response = self
            .client
            .post(self.url("/scraps"))
            .bearer_auth(self.bearer()?)
            .json(&json!({
                "url": url,
                "title": title,
                "content": content,
                "persona": persona.as_str(),
                "word_count": word_count,
            }))
            .send()
            .await?;

        let envelope: ScrapEnvelope = Self::decode(response).await?;
        Ok(envelope.scrap)
    }

    /// POST /scraps/send
    pub async fn send_scrap(
        &self,
        scrap_id: Uuid,
        integration_id: Uuid,
        user_comment: Option<&str>,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url("/scraps/send"))
            .bearer_auth(self.bearer()?)
            .json(&json!({
                "scrap_id": scrap_id,
                "integration_id": integration_id,
                "user_comment": user_comment,
            }))
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }
}
