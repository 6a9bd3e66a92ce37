//! Generation endpoint client.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::preview_state::{decode_generation_response, GenerateOutcome};

pub const GENERATE_PATH: &str = "/api/generate";

/// POST `{prompt}` to the generation endpoint and classify the result.
/// Never fails: transport errors come back as [`GenerateOutcome::Network`].
pub async fn request_generation(prompt: &str) -> GenerateOutcome {
    match post_json(GENERATE_PATH, &serde_json::json!({ "prompt": prompt })).await {
        Ok((status_ok, body)) => decode_generation_response(status_ok, &body),
        Err(e) => GenerateOutcome::Network(e),
    }
}

/// Returns whether the status was 2xx and the response text.
async fn post_json(path: &str, payload: &serde_json::Value) -> Result<(bool, String), String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&payload.to_string()));

    let request = Request::new_with_str_and_init(path, &opts)
        .map_err(|e| format!("request error: {:?}", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("header error: {:?}", e))?;

    let window = web_sys::window().ok_or("no window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "response is not a Response")?;

    let text = JsFuture::from(resp.text().map_err(|e| format!("text promise error: {:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;

    Ok((resp.ok(), text.as_string().unwrap_or_default()))
}
