mod lmstudio;
mod openai;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use lmstudio::LmStudioClient;
pub use openai::OpenAiClient;

use crate::config::{HttpConfig, LlmProvider};

pub type SharedLlm = Arc<dyn LlmClient>;

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a role-tagged conversation and return the assistant's text.
    async fn complete_chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Create a client from a provider configuration. `api_key_override` wins over
/// configured keys for providers that need one.
pub fn create_client(
    provider: &LlmProvider,
    http: &HttpConfig,
    api_key_override: Option<String>,
) -> Result<SharedLlm> {
    match provider {
        LlmProvider::OpenAi { endpoint, .. } => {
            let api_key = api_key_override
                .or_else(|| provider.openai_api_key())
                .ok_or_else(|| anyhow!("OpenAI requires api_key or api_key_env to be set"))?;
            Ok(Arc::new(OpenAiClient::new(endpoint, &api_key, http)?))
        }
        LlmProvider::LmStudio { endpoint } => Ok(Arc::new(LmStudioClient::new(endpoint, http))),
    }
}

fn chat_completions_url(endpoint: &str) -> String {
    format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
}

fn extract_text(resp: &Value) -> Result<String> {
    let choice = resp
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| anyhow!("choices missing"))?;
    let message = choice
        .get("message")
        .ok_or_else(|| anyhow!("message missing"))?;

    if let Some(content) = message.get("content") {
        if let Some(text) = content.as_str() {
            return Ok(text.to_string());
        }
        if let Some(items) = content.as_array() {
            let combined: String = items
                .iter()
                .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                .collect();
            if !combined.is_empty() {
                return Ok(combined);
            }
        }
    }

    Err(anyhow!("Unable to extract text from chat completion response"))
}
