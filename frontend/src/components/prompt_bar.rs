use leptos::prelude::*;

/// Prompt input, generate trigger and status line.
#[component]
pub fn PromptBar(
    #[prop(into)] prompt: Signal<String>,
    #[prop(into)] status: Signal<String>,
    #[prop(into)] is_error: Signal<bool>,
    #[prop(into)] in_flight: Signal<bool>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_generate: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="prompt-bar">
            <input
                id="promptInput"
                type="text"
                placeholder="Describe the page you want to build"
                prop:value=move || prompt.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        on_generate.run(());
                    }
                }
            />
            <button
                id="generateBtn"
                disabled=move || in_flight.get()
                on:click=move |_| on_generate.run(())
            >
                "Generate"
            </button>
            <p
                id="status"
                role="status"
                class=("status-error", move || is_error.get())
            >
                {move || status.get()}
            </p>
        </section>
    }
}
