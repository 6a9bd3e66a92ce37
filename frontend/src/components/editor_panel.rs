use leptos::prelude::*;

/// A labelled code editor. Every keystroke is reported through `on_input`.
#[component]
pub fn EditorPanel(
    id: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="editor-panel">
            <label for=id>{label}</label>
            <textarea
                id=id
                spellcheck="false"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
