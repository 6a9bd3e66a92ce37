//! Generated-text extraction.
//!
//! Upstream vendors nest the model's text in different places. Each known shape
//! is a named strategy; they run in priority order and the first hit wins. When
//! nothing matches, the whole body is serialized so the caller still has
//! something to log and attempt recovery on.

use serde_json::Value;

/// A strategy inspects the upstream body and yields the generated text if the
/// body has the shape it knows.
pub type Strategy = fn(&Value) -> Option<String>;

/// Name of the catch-all used when no strategy matches.
pub const STRINGIFIED_BODY: &str = "stringified_body";

/// Known response shapes, in priority order.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("output_content", output_content),
    ("candidate_content", candidate_content),
    ("text_field", text_field),
    ("raw_string", raw_string),
];

/// Text pulled out of an upstream response, tagged with the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub strategy: &'static str,
    pub text: String,
}

/// Run the strategies in order, falling back to the serialized body.
pub fn extract_generated_text(body: &Value) -> Extracted {
    STRATEGIES
        .iter()
        .find_map(|&(name, strategy)| {
            strategy(body).map(|text| Extracted {
                strategy: name,
                text,
            })
        })
        .unwrap_or_else(|| Extracted {
            strategy: STRINGIFIED_BODY,
            text: body.to_string(),
        })
}

/// `output[0].content`
fn output_content(body: &Value) -> Option<String> {
    first_content(body.get("output")?)
}

/// `candidates[0].content`
fn candidate_content(body: &Value) -> Option<String> {
    first_content(body.get("candidates")?)
}

/// Top-level `text`, empty strings included.
fn text_field(body: &Value) -> Option<String> {
    body.get("text")?.as_str().map(str::to_string)
}

/// The whole payload is a JSON string.
fn raw_string(body: &Value) -> Option<String> {
    body.as_str().map(str::to_string)
}

fn first_content(list: &Value) -> Option<String> {
    let content = list.as_array()?.first()?.get("content")?;
    if !is_truthy(content) {
        return None;
    }
    Some(content_text(content))
}

/// Strings are taken verbatim. Part lists (`[{text}, ...]` or
/// `{parts: [{text}, ...]}`) have their texts concatenated. Anything else is
/// serialized.
fn content_text(content: &Value) -> String {
    let parts = match content {
        Value::String(text) => return text.clone(),
        Value::Array(parts) => Some(parts),
        Value::Object(map) => map.get("parts").and_then(Value::as_array),
        _ => None,
    };

    parts
        .and_then(|parts| join_part_texts(parts))
        .unwrap_or_else(|| content.to_string())
}

fn join_part_texts(parts: &[Value]) -> Option<String> {
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Truthiness as a JSON-producing upstream would see it: null, false, 0 and
/// "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
