//! Server error types and their HTTP mapping.

use crate::core::codegen::{BundleError, RecoveryError};
use crate::core::llm::LLMError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

/// A failed call to the generation endpoint.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing or invalid 'prompt' in request body")]
    InvalidPrompt,

    #[error("Server missing GEMINI_API_KEY environment variable")]
    MissingCredential,

    #[error("Upstream API error")]
    Upstream { status: u16, body: String },

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("Internal server error")]
    Internal(String),
}

impl From<LLMError> for GenerateError {
    fn from(error: LLMError) -> Self {
        match error {
            LLMError::ApiError { status, message } => GenerateError::Upstream {
                status,
                body: message,
            },
            LLMError::NotConfigured(_) => GenerateError::MissingCredential,
            other => GenerateError::Internal(other.to_string()),
        }
    }
}

impl From<BundleError> for GenerateError {
    fn from(error: BundleError) -> Self {
        match error {
            BundleError::Recovery(e) => GenerateError::Recovery(e),
            BundleError::NullOutput => GenerateError::Internal(error.to_string()),
        }
    }
}

impl GenerateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GenerateError::InvalidPrompt => StatusCode::BAD_REQUEST,
            GenerateError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GenerateError::MissingCredential
            | GenerateError::Recovery(_)
            | GenerateError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body: `error` plus `details` or `raw` where the variant carries them.
    pub fn body(&self) -> Value {
        let error = self.to_string();
        match self {
            GenerateError::Upstream { body, .. } => json!({ "error": error, "details": body }),
            GenerateError::Recovery(e) => json!({ "error": error, "raw": e.raw() }),
            GenerateError::Internal(details) => json!({ "error": error, "details": details }),
            _ => json!({ "error": error }),
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.body());
        match self {
            GenerateError::MethodNotAllowed => {
                (status, [(header::ALLOW, "POST")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

/// Failures starting the HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Service already running")]
    AlreadyRunning,

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize upstream provider: {0}")]
    Provider(#[from] LLMError),
}
