use anyhow::{Result, anyhow};
use reqwest::Client;
use serde_json::{Value, json};

use super::{ChatMessage, LlmClient, chat_completions_url, extract_text};
use crate::{config::HttpConfig, http::build_client};

/// Local OpenAI-compatible server; no authentication.
pub struct LmStudioClient {
    http: Client,
    url: String,
}

impl LmStudioClient {
    pub fn new(endpoint: impl AsRef<str>, config: &HttpConfig) -> Self {
        Self {
            http: build_client(config),
            url: chat_completions_url(endpoint.as_ref()),
        }
    }

    async fn send(&self, payload: Value) -> Result<Value> {
        let resp = self.http.post(&self.url).json(&payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|_| "no body".to_string());
            tracing::error!(%status, %body, "LM Studio request failed");
            return Err(anyhow!("LM Studio error {}: {}", status, body));
        }

        let json: Value = resp.json().await?;
        Ok(json)
    }
}

#[async_trait::async_trait]
impl LlmClient for LmStudioClient {
    async fn complete_chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String> {
        let body = json!({
            "model": model,
            "messages": messages,
            "stream": false
        });

        let resp = self.send(body).await?;
        extract_text(&resp)
    }
}
