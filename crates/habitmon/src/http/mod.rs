//! Thin GET-JSON seam shared by the creature and weather lookups.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::HttpConfig;

pub type SharedFetcher = Arc<dyn HttpFetcher>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("no API key configured")]
    MissingApiKey,
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url` with the given query pairs and decode the body as JSON.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;
}

/// Builds the shared reqwest client with the configured request deadline.
pub fn build_client(config: &HttpConfig) -> Client {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(?err, "Falling back to default HTTP client");
            Client::new()
        })
}

pub struct ReqwestFetcher {
    http: Client,
}

impl ReqwestFetcher {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(build_client(config))
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self.http.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
