use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The generated page: three code strings, always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBundle {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl CodeBundle {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Build from parsed model output. String fields are kept verbatim;
    /// missing keys, nulls and non-string values become `""`. A non-null value
    /// that is not an object yields an empty bundle.
    pub fn from_model_output(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self::new(field("html"), field("css"), field("js"))
    }

    /// True when none of the three strings has any content.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}
