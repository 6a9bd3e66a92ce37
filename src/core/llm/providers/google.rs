//! Google Provider Implementation (API Key-based)
//!
//! Calls the Google generative-AI REST endpoint (or any endpoint override
//! speaking the same `{ input: [...] }` body) with bearer-token auth.

use crate::config::UpstreamConfig;
use crate::core::llm::error::{LLMError, Result};
use crate::core::llm::provider::LLMProvider;
use crate::core::llm::types::UpstreamRequest;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Google provider (API key-based)
pub struct GoogleProvider {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl std::fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GoogleProvider {
    pub fn new(
        api_key: String,
        model: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            endpoint,
            client,
        })
    }

    /// Build from configuration. Fails with `NotConfigured` when no
    /// credential is present.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config.credential().ok_or_else(|| {
            LLMError::NotConfigured("no upstream API key configured".to_string())
        })?;

        Self::new(
            api_key.to_string(),
            config.model.clone(),
            config.endpoint_url(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    fn id(&self) -> &str {
        "google"
    }

    fn name(&self) -> &str {
        "Google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: UpstreamRequest) -> Result<serde_json::Value> {
        let start = Instant::now();
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LLMError::from_transport)?;

        let status = resp.status();
        let latency = start.elapsed().as_millis() as u64;
        debug!(status = status.as_u16(), latency_ms = latency, "upstream responded");

        if !status.is_success() {
            let text = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to read upstream error body: {}", e);
                    String::new()
                }
            };
            error!("Upstream API error: {} {}", status.as_u16(), text);
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = resp.text().await.map_err(LLMError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| {
            LLMError::InvalidResponse(format!("upstream body is not valid JSON: {}", e))
        })
    }
}
