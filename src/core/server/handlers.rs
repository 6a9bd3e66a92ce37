//! HTTP handlers for the generation endpoint.

use super::error::GenerateError;
use super::ServerState;
use crate::core::codegen::{build_upstream_request, bundle_from_response, CodeBundle};
use crate::core::llm::LLMProvider;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

/// Parse a request body. Bodies that are not JSON objects are read as `{}`,
/// so they fail the prompt check like any other missing prompt.
pub fn validate_request(body: &[u8]) -> Result<GenerationRequest, GenerateError> {
    let value: Value = serde_json::from_slice(body).unwrap_or_else(|_| json!({}));

    match value.get("prompt").and_then(Value::as_str) {
        Some(prompt) if !prompt.is_empty() => Ok(GenerationRequest {
            prompt: prompt.to_string(),
        }),
        _ => Err(GenerateError::InvalidPrompt),
    }
}

/// Validate, call upstream once, and recover the bundle.
pub async fn run_generation(
    provider: Option<&dyn LLMProvider>,
    body: &[u8],
) -> Result<CodeBundle, GenerateError> {
    let request = validate_request(body)?;
    let provider = provider.ok_or(GenerateError::MissingCredential)?;

    info!(
        provider = provider.name(),
        model = provider.model(),
        prompt_chars = request.prompt.len(),
        "calling upstream"
    );

    let response = provider
        .generate(build_upstream_request(&request.prompt))
        .await?;

    Ok(bundle_from_response(&response)?)
}

/// `POST /api/generate`
pub async fn generate(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate", %request_id);

    async move {
        match run_generation(state.provider.as_deref(), &body).await {
            Ok(bundle) => {
                info!(
                    html = bundle.html.len(),
                    css = bundle.css.len(),
                    js = bundle.js.len(),
                    "generation complete"
                );
                (StatusCode::OK, Json(bundle)).into_response()
            }
            Err(e) => {
                warn!(status = e.status_code().as_u16(), error = %e, "generation failed");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// Any method other than POST on the generation path.
pub async fn method_not_allowed() -> Response {
    GenerateError::MethodNotAllowed.into_response()
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
