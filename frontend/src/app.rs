use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::editor_panel::EditorPanel;
use crate::components::preview_frame::PreviewFrame;
use crate::components::prompt_bar::PromptBar;
use crate::services::api::request_generation;
use crate::services::preview_state::{Command, PreviewEvent, PreviewState};

/// Apply an event and run whatever command it produces.
fn dispatch(state: RwSignal<PreviewState>, event: PreviewEvent) {
    let command = state.try_update(|s| s.apply(event)).flatten();

    match command {
        Some(Command::RequestGeneration { prompt }) => {
            spawn_local(async move {
                let outcome = request_generation(&prompt).await;
                dispatch(state, PreviewEvent::Settled(outcome));
            });
        }
        Some(Command::ReportFailure { context, detail }) => {
            web_sys::console::error_2(&context.into(), &detail.into());
        }
        None => {}
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(PreviewState::default());

    let prompt = Signal::derive(move || state.with(|s| s.prompt.clone()));
    let status = Signal::derive(move || state.with(|s| s.status.text.clone()));
    let is_error = Signal::derive(move || state.with(|s| s.status.is_error));
    let in_flight = Signal::derive(move || state.with(|s| s.in_flight));

    let html = Signal::derive(move || state.with(|s| s.html.clone()));
    let css = Signal::derive(move || state.with(|s| s.css.clone()));
    let js = Signal::derive(move || state.with(|s| s.js.clone()));

    let html_doc = Memo::new(move |_| state.with(|s| s.html_preview()));
    let css_doc = Memo::new(move |_| state.with(|s| s.css_preview()));
    let js_doc = Memo::new(move |_| state.with(|s| s.js_preview()));

    let on_prompt = Callback::new(move |value: String| {
        dispatch(state, PreviewEvent::PromptEdited(value))
    });
    let on_generate = Callback::new(move |_: ()| dispatch(state, PreviewEvent::GenerateClicked));
    let on_html = Callback::new(move |value: String| dispatch(state, PreviewEvent::HtmlEdited(value)));
    let on_css = Callback::new(move |value: String| dispatch(state, PreviewEvent::CssEdited(value)));
    let on_js = Callback::new(move |value: String| dispatch(state, PreviewEvent::JsEdited(value)));

    view! {
        <main class="rebuild-app">
            <header>
                <h1>"Rebuild"</h1>
            </header>

            <PromptBar
                prompt=prompt
                status=status
                is_error=is_error
                in_flight=in_flight
                on_input=on_prompt
                on_generate=on_generate
            />

            <section class="editors">
                <EditorPanel
                    id="htmlInput"
                    label="HTML"
                    value=html
                    on_input=on_html
                />
                <EditorPanel
                    id="cssInput"
                    label="CSS"
                    value=css
                    on_input=on_css
                />
                <EditorPanel
                    id="jsInput"
                    label="JavaScript"
                    value=js
                    on_input=on_js
                />
            </section>

            <section class="previews">
                <PreviewFrame id="htmlPreview" title="HTML preview" document=html_doc />
                <PreviewFrame id="cssPreview" title="CSS preview" document=css_doc />
                <PreviewFrame id="jsPreview" title="JS preview" document=js_doc />
            </section>
        </main>
    }
}
