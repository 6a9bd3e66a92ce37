//! Code generation contract.
//!
//! Builds the upstream request for a prompt and turns the upstream response
//! into a [`CodeBundle`]:
//! 1. `extract`: locate the generated text in the response body
//! 2. `recover`: parse it as JSON, with brace-block recovery
//! 3. `bundle`: default missing `html`/`css`/`js` fields
//!
//! Output that parses to `null` has no fields to read and is rejected.

pub mod bundle;
pub mod extract;
pub mod recover;

pub use bundle::CodeBundle;
pub use extract::{extract_generated_text, Extracted};
pub use recover::{recover_json, RecoveryError};

use crate::core::llm::{ChatMessage, UpstreamRequest};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Fixed instruction sent ahead of every prompt.
pub const SYSTEM_INSTRUCTION: &str = "Return valid JSON only. The JSON object must have three keys: \"html\", \"css\", \"js\". Each value should be a string containing the code for that file. Do not include any extra commentary.";

/// Upstream request for a user prompt: the system instruction, then the prompt verbatim.
pub fn build_upstream_request(prompt: &str) -> UpstreamRequest {
    UpstreamRequest::new(vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        ChatMessage::user(prompt),
    ])
}

/// Model output that could not become a bundle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("Model output parsed as null")]
    NullOutput,
}

/// Turn a successful upstream response body into a bundle.
pub fn bundle_from_response(body: &Value) -> Result<CodeBundle, BundleError> {
    let extracted = extract_generated_text(body);
    debug!(
        strategy = extracted.strategy,
        chars = extracted.text.len(),
        "extracted generated text"
    );

    let parsed = recover_json(&extracted.text).map_err(|e| {
        match &e {
            RecoveryError::NoJson { raw } => error!("No JSON found in model output: {}", raw),
            RecoveryError::ParseFailure { reason, .. } => {
                error!("Failed to parse JSON substring: {}", reason)
            }
        }
        e
    })?;

    if parsed.is_null() {
        error!("Model output parsed as null: {}", extracted.text);
        return Err(BundleError::NullOutput);
    }

    let bundle = CodeBundle::from_model_output(&parsed);
    if bundle.is_empty() {
        warn!("Model output has no html, css or js content");
    }
    Ok(bundle)
}
