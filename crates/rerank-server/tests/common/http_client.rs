//! HTTP client helpers for tests.

use rerank::{RerankRequest, RerankResponse};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn rerank(&self, request: &RerankRequest) -> Result<RerankResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/rerank"))
            .json(request)
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, TestClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}
