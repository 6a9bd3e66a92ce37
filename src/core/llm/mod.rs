//! LLM Client Module
//!
//! Upstream text-generation access for the generation endpoint.
//!
//! # Module Structure
//!
//! - `error`: `LLMError` and the module `Result`
//! - `types`: role-tagged messages and the upstream request body
//! - `provider`: the `LLMProvider` trait
//! - `providers`: concrete provider implementations

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::{LLMError, Result};
pub use provider::LLMProvider;
pub use providers::GoogleProvider;
pub use types::{ChatMessage, MessageRole, UpstreamRequest};
