//! LLM Message Types
//!
//! Role-tagged messages and the request body sent upstream.

use serde::{Deserialize, Serialize};

/// Role of a message in the upstream input
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A single message in the upstream input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request body for the upstream text-generation API:
/// `{ "input": [{ "role": ..., "content": ... }, ...] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub input: Vec<ChatMessage>,
}

impl UpstreamRequest {
    pub fn new(input: Vec<ChatMessage>) -> Self {
        Self { input }
    }
}
