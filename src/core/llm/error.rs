//! LLM Error Types

/// Errors that can occur while talking to the upstream API
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timeout")]
    Timeout,
}

impl LLMError {
    /// Classify a transport error, separating timeouts from other failures.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LLMError::Timeout
        } else {
            LLMError::HttpError(error)
        }
    }
}

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;
