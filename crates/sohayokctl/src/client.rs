//! HTTP client for sohayokd

use anyhow::{bail, Context, Result};
use reqwest::Response;
use sohayok_common::api::{ResolveResponse, SessionCreated, SessionLog, TextRequest};
use sohayok_common::{ConversationLog, Message};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RemoteClient {
    base: String,
    http: reqwest::Client,
}

/// Non-2xx replies become errors carrying the status and the daemon's text
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("sohayokd answered {}: {}", status, body.trim())
}

impl RemoteClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn text_body(text: &str) -> TextRequest {
        TextRequest {
            text: text.to_string(),
        }
    }

    pub async fn resolve(&self, text: &str) -> Result<ResolveResponse> {
        let response = self
            .http
            .post(self.url("/v1/resolve"))
            .json(&Self::text_body(text))
            .send()
            .await
            .with_context(|| format!("Failed to reach sohayokd at {}", self.base))?;
        ensure_success(response)
            .await?
            .json()
            .await
            .context("Invalid resolve response")
    }

    pub async fn open_session(&self) -> Result<Uuid> {
        let response = self
            .http
            .post(self.url("/v1/sessions"))
            .send()
            .await
            .with_context(|| format!("Failed to reach sohayokd at {}", self.base))?;
        let created: SessionCreated = ensure_success(response)
            .await
            .context("Daemon refused to open a session")?
            .json()
            .await
            .context("Invalid session response")?;
        Ok(created.session_id)
    }

    pub async fn submit(&self, session: Uuid, text: &str) -> Result<Message> {
        let response = self
            .http
            .post(self.url(&format!("/v1/sessions/{}/messages", session)))
            .json(&Self::text_body(text))
            .send()
            .await
            .context("Failed to send message")?;
        ensure_success(response)
            .await?
            .json()
            .await
            .context("Invalid message response")
    }

    pub async fn log(&self, session: Uuid) -> Result<ConversationLog> {
        let response = self
            .http
            .get(self.url(&format!("/v1/sessions/{}/messages", session)))
            .send()
            .await
            .context("Failed to fetch conversation")?;
        let log: SessionLog = ensure_success(response)
            .await?
            .json()
            .await
            .context("Invalid conversation response")?;
        Ok(log.messages)
    }

    pub async fn close_session(&self, session: Uuid) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/v1/sessions/{}", session)))
            .send()
            .await
            .context("Failed to close session")?;
        ensure_success(response).await?;
        Ok(())
    }
}
