//! Google Provider Unit Tests
//!
//! Exercises `GoogleProvider::generate` against a wiremock upstream:
//! - request formatting (bearer auth, JSON body shape)
//! - success body passthrough
//! - non-2xx, non-JSON and timeout failures

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::codegen::{build_upstream_request, SYSTEM_INSTRUCTION};
use crate::core::llm::{GoogleProvider, LLMError, LLMProvider};

fn provider_for(server: &MockServer, timeout: Duration) -> GoogleProvider {
    GoogleProvider::new(
        "AIzaTestApiKey".to_string(),
        "gemini-2.5-flash".to_string(),
        format!("{}/v1/models/gemini-2.5-flash:generateContent", server.uri()),
        timeout,
    )
    .unwrap()
}

// =============================================================================
// Request Formatting
// =============================================================================

#[tokio::test]
async fn test_request_carries_bearer_token_and_input_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-flash:generateContent"))
        .and(header("authorization", "Bearer AIzaTestApiKey"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "input": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": "a todo list" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "{}" })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let body = provider
        .generate(build_upstream_request("a todo list"))
        .await
        .unwrap();

    assert_eq!(body, json!({ "text": "{}" }));
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_non_success_status_is_api_error_with_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("{\"error\":{\"message\":\"API key not valid\"}}"),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let err = provider
        .generate(build_upstream_request("x"))
        .await
        .unwrap_err();

    match err {
        LLMError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "{\"error\":{\"message\":\"API key not valid\"}}");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let err = provider
        .generate(build_upstream_request("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::ApiError { status: 429, .. }));
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway page</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let err = provider
        .generate(build_upstream_request("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "text": "{}" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_millis(100));
    let err = provider
        .generate(build_upstream_request("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::Timeout));
}

/// Accept one connection, consume the request, then answer with a status
/// line and a body cut short of its declared length.
async fn truncated_error_upstream(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request).to_lowercase();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let declared: usize = text[..head_end]
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse().ok())
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + declared {
                    break;
                }
            }
        }

        let response = format!("{}\r\ncontent-length: 64\r\n\r\npartial", status_line);
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/v1/models/gemini-2.5-flash:generateContent", addr)
}

#[tokio::test]
async fn test_unreadable_error_body_keeps_status() {
    let endpoint = truncated_error_upstream("HTTP/1.1 503 Service Unavailable").await;
    let provider = GoogleProvider::new(
        "AIzaTestApiKey".to_string(),
        "gemini-2.5-flash".to_string(),
        endpoint,
        Duration::from_secs(5),
    )
    .unwrap();

    let err = provider
        .generate(build_upstream_request("x"))
        .await
        .unwrap_err();

    match err {
        LLMError::ApiError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}
