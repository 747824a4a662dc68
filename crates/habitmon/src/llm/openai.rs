use anyhow::{Context, Result};
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::{Value, json};

use super::{ChatMessage, LlmClient, chat_completions_url, extract_text};
use crate::{config::HttpConfig, http::build_client};

pub struct OpenAiClient {
    http: Client,
    headers: HeaderMap,
    url: String,
}

impl OpenAiClient {
    pub fn new(endpoint: &str, api_key: &str, config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("API key is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: build_client(config),
            headers,
            url: chat_completions_url(endpoint),
        })
    }

    async fn send(&self, payload: Value) -> Result<Value> {
        let resp = self
            .http
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(resp)
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
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
