use leptos::prelude::*;

/// Sandboxed preview surface.
///
/// Only `allow-scripts` is granted, so the frame runs with an opaque origin
/// and generated code cannot reach the host page.
#[component]
pub fn PreviewFrame(
    id: &'static str,
    title: &'static str,
    #[prop(into)] document: Signal<String>,
) -> impl IntoView {
    view! {
        <figure class="preview-frame">
            <figcaption>{title}</figcaption>
            <iframe id=id title=title sandbox="allow-scripts" srcdoc=move || document.get()></iframe>
        </figure>
    }
}
