//! LLM Provider Trait

use super::error::Result;
use super::types::UpstreamRequest;
use async_trait::async_trait;

/// An upstream text-generation API.
///
/// `generate` returns the raw JSON body of a successful response; locating the
/// generated text inside it is left to the caller because the shape varies by
/// vendor.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider's unique identifier
    fn id(&self) -> &str;

    /// Get the provider's display name
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Send one generation request upstream
    async fn generate(&self, request: UpstreamRequest) -> Result<serde_json::Value>;
}
