//! JSON recovery from free-form model output.
//!
//! Models asked for "JSON only" still wrap it in prose or markdown fences.
//! Recovery tries the text as-is, then the widest `{ ... }` span in it (first
//! opening brace through last closing brace). The wide span can swallow two
//! adjacent objects or stray braces in surrounding prose; in that case the
//! parse fails and the caller gets the raw text back.

use serde_json::Value;

/// Model output could not be turned into a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoveryError {
    /// Not JSON, and no brace-delimited block to try.
    #[error("Model did not return JSON")]
    NoJson { raw: String },

    /// A brace-delimited block was found but did not parse.
    #[error("Failed to parse model output as JSON")]
    ParseFailure { raw: String, reason: String },
}

impl RecoveryError {
    /// The unparsed model text, returned to the caller for debugging.
    pub fn raw(&self) -> &str {
        match self {
            RecoveryError::NoJson { raw } | RecoveryError::ParseFailure { raw, .. } => raw,
        }
    }
}

/// The widest `{ ... }` span: first `{` through the last `}` after it.
pub fn brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse `text` as JSON, falling back to its brace block.
pub fn recover_json(text: &str) -> Result<Value, RecoveryError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let block = brace_block(text).ok_or_else(|| RecoveryError::NoJson {
        raw: text.to_string(),
    })?;

    serde_json::from_str(block).map_err(|e| RecoveryError::ParseFailure {
        raw: text.to_string(),
        reason: e.to_string(),
    })
}
