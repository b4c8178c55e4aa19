use anyhow::{Context, Result};
use async_trait::async_trait;
use parley_llm::ChatMessage;
use serde::Deserialize;

use crate::summary::SummaryResult;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Trait for the chat relay boundary
///
/// The relay injects the default system prompt when the message list carries
/// none, and persists the assistant reply keyed to the conversation id.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Forward a message list to the completion provider and return the reply
    async fn chat(&self, conversation_id: &str, messages: &[ChatMessage]) -> Result<String>;

    /// Turn a text blob into a short summary plus key terms
    async fn summarize(&self, text: &str) -> Result<SummaryResult>;
}

/// HTTP client for the relay's `/api/chat` and `/api/summarize` endpoints
pub struct HttpBackend {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `PARLEY_BACKEND_URL`, falling back to localhost
    pub fn from_env() -> Self {
        let base_url = std::env::var("PARLEY_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, conversation_id: &str, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({
                "conversation_id": conversation_id,
                "messages": messages,
            }))
            .send()
            .await
            .context("Failed to reach chat relay")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat relay error ({}): {}", status, body);
        }

        let body: ChatReplyBody = response
            .json()
            .await
            .context("Failed to parse chat relay response")?;
        Ok(body.message)
    }

    async fn summarize(&self, text: &str) -> Result<SummaryResult> {
        let url = format!("{}/api/summarize", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .context("Failed to reach summarization endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Summarization endpoint error ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse summarization response")
    }
}

#[derive(Debug, Deserialize)]
struct ChatReplyBody {
    message: String,
}
