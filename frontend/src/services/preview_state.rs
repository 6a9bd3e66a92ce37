//! Preview client state.
//!
//! All UI transitions go through [`PreviewState::apply`]. It never performs
//! I/O itself; work that leaves the page (the generation request, console
//! reports) comes back as a [`Command`] for the caller to run.

use serde_json::Value;

use super::document::{css_preview_doc, html_preview_doc, js_preview_doc};

pub const MSG_EMPTY_PROMPT: &str = "Please enter a prompt.";
pub const MSG_GENERATING: &str = "Generating…";
pub const MSG_GENERATED: &str = "Generated. Editors updated.";
pub const MSG_REJECTED: &str = "Generation failed. See console.";
pub const MSG_UNEXPECTED: &str = "Unexpected response from server. See console.";
pub const MSG_NETWORK: &str = "Network or server error. See console.";

/// The three code strings returned by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedBundle {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Classified result of one generation request.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerateOutcome {
    Generated(GeneratedBundle),
    /// Non-success status; carries the decoded error body.
    Rejected(Value),
    /// Success status whose body has none of the `html`, `css`, `js` keys.
    UnexpectedShape(Value),
    /// Transport failure or an undecodable body.
    Network(String),
}

/// Classify an HTTP result. `body` is the raw response text.
pub fn decode_generation_response(status_ok: bool, body: &str) -> GenerateOutcome {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => return GenerateOutcome::Network(format!("Invalid JSON response: {}", e)),
    };

    if !status_ok {
        return GenerateOutcome::Rejected(data);
    }

    // A key counts as present even when its value is null
    if ["html", "css", "js"].iter().all(|key| data.get(key).is_none()) {
        return GenerateOutcome::UnexpectedShape(data);
    }

    let text = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    GenerateOutcome::Generated(GeneratedBundle {
        html: text("html"),
        css: text("css"),
        js: text("js"),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    fn info(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_error: false,
        }
    }

    fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_error: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PreviewEvent {
    PromptEdited(String),
    HtmlEdited(String),
    CssEdited(String),
    JsEdited(String),
    GenerateClicked,
    Settled(GenerateOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// POST the (trimmed) prompt to the generation endpoint.
    RequestGeneration { prompt: String },
    /// Write failure details to the browser console.
    ReportFailure { context: &'static str, detail: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub prompt: String,
    pub html: String,
    pub css: String,
    pub js: String,
    pub status: Status,
    pub in_flight: bool,
}

impl PreviewState {
    pub fn apply(&mut self, event: PreviewEvent) -> Option<Command> {
        match event {
            PreviewEvent::PromptEdited(prompt) => {
                self.prompt = prompt;
                None
            }
            PreviewEvent::HtmlEdited(html) => {
                self.html = html;
                None
            }
            PreviewEvent::CssEdited(css) => {
                self.css = css;
                None
            }
            PreviewEvent::JsEdited(js) => {
                self.js = js;
                None
            }
            PreviewEvent::GenerateClicked => self.start_generation(),
            PreviewEvent::Settled(outcome) => self.settle(outcome),
        }
    }

    fn start_generation(&mut self) -> Option<Command> {
        if self.in_flight {
            return None;
        }

        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            self.status = Status::error(MSG_EMPTY_PROMPT);
            return None;
        }

        let prompt = prompt.to_string();
        self.in_flight = true;
        self.status = Status::info(MSG_GENERATING);
        Some(Command::RequestGeneration { prompt })
    }

    fn settle(&mut self, outcome: GenerateOutcome) -> Option<Command> {
        self.in_flight = false;

        match outcome {
            GenerateOutcome::Generated(bundle) => {
                self.html = bundle.html;
                self.css = bundle.css;
                self.js = bundle.js;
                self.status = Status::info(MSG_GENERATED);
                None
            }
            GenerateOutcome::Rejected(body) => {
                self.status = Status::error(MSG_REJECTED);
                Some(Command::ReportFailure {
                    context: "Backend error",
                    detail: body.to_string(),
                })
            }
            GenerateOutcome::UnexpectedShape(body) => {
                self.status = Status::error(MSG_UNEXPECTED);
                Some(Command::ReportFailure {
                    context: "Unexpected response shape",
                    detail: body.to_string(),
                })
            }
            GenerateOutcome::Network(detail) => {
                self.status = Status::error(MSG_NETWORK);
                Some(Command::ReportFailure {
                    context: "Request failed",
                    detail,
                })
            }
        }
    }

    pub fn html_preview(&self) -> String {
        html_preview_doc(&self.html, &self.css)
    }

    pub fn css_preview(&self) -> String {
        css_preview_doc(&self.css)
    }

    pub fn js_preview(&self) -> String {
        js_preview_doc(&self.js)
    }
}
