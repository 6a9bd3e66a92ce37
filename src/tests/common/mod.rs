//! Common Test Utilities
//!
//! Shared helpers used across test modules:
//! - `RecordingProvider`, an `LLMProvider` that replies from a closure and
//!   records every request it receives
//! - upstream response bodies in the shapes vendors actually return
//! - router request/response plumbing

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::core::llm::{GoogleProvider, LLMError, LLMProvider, MessageRole, Result, UpstreamRequest};
use crate::core::server::{router, ServerState};

// =============================================================================
// Recording Provider
// =============================================================================

type Reply = Box<dyn Fn() -> Result<Value> + Send + Sync>;

/// A provider double that never touches the network.
pub struct RecordingProvider {
    reply: Reply,
    call_count: AtomicU32,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl RecordingProvider {
    pub fn with_reply(reply: impl Fn() -> Result<Value> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `body`.
    pub fn replying(body: Value) -> Self {
        Self::with_reply(move || Ok(body.clone()))
    }

    /// Always fails with a non-2xx upstream status.
    pub fn api_error(status: u16, message: &str) -> Self {
        let message = message.to_string();
        Self::with_reply(move || {
            Err(LLMError::ApiError {
                status,
                message: message.clone(),
            })
        })
    }

    pub fn timing_out() -> Self {
        Self::with_reply(|| Err(LLMError::Timeout))
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    fn id(&self) -> &str {
        "recording"
    }

    fn name(&self) -> &str {
        "Recording"
    }

    fn model(&self) -> &str {
        "recording-model"
    }

    async fn generate(&self, request: UpstreamRequest) -> Result<Value> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        (self.reply)()
    }
}

/// Content of the first user-role message in a recorded request.
pub fn user_prompt(request: &UpstreamRequest) -> Option<&str> {
    request
        .input
        .iter()
        .find(|m| m.role == MessageRole::User)
        .map(|m| m.content.as_str())
}

// =============================================================================
// Upstream Bodies
// =============================================================================

/// `{"candidates": [{"content": text}]}`
pub fn candidate_body(text: &str) -> Value {
    json!({ "candidates": [{ "content": text }] })
}

/// Gemini `generateContent` shape with the text in `parts`.
pub fn gemini_parts_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// `{"output": [{"content": text}]}`
pub fn output_body(text: &str) -> Value {
    json!({ "output": [{ "content": text }] })
}

// =============================================================================
// Router Plumbing
// =============================================================================

/// Router backed by `provider`, without static assets.
pub fn app_with(provider: Arc<RecordingProvider>) -> Router {
    let provider: Arc<dyn LLMProvider> = provider;
    router(Arc::new(ServerState::new(provider)), None)
}

/// Router with no credential configured.
pub fn app_without_credential() -> Router {
    router(Arc::new(ServerState::default()), None)
}

/// Router backed by a real `GoogleProvider` pointed at `endpoint`.
pub fn app_for_endpoint(endpoint: String) -> Router {
    let provider = GoogleProvider::new(
        "test-key".to_string(),
        "gemini-2.5-flash".to_string(),
        endpoint,
        Duration::from_secs(5),
    )
    .expect("Failed to build provider");
    router(Arc::new(ServerState::new(Arc::new(provider))), None)
}

pub fn post_generate(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn post_prompt(prompt: &str) -> Request<Body> {
    post_generate(json!({ "prompt": prompt }).to_string())
}

/// Send one request; returns status, response headers and the JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}
