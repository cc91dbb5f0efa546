//! Log Panel Component
//!
//! Collapsible view of the records held by the in-memory log sink.

use leptos::prelude::*;

fn snapshot() -> Vec<String> {
    rolling_logger::global()
        .map(|logger| logger.entries().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Recent log lines, oldest first
#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let refresh = move || set_lines.set(snapshot());
    let clear = move |_| {
        if let Some(logger) = rolling_logger::global() {
            logger.clear();
        }
        refresh();
    };

    view! {
        <div class="log-panel">
            <button
                class="log-toggle"
                on:click=move |_| {
                    if !open.get_untracked() { refresh(); }
                    set_open.update(|o| *o = !*o);
                }
            >
                {move || if open.get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || open.get()>
                <div class="log-actions">
                    <button on:click=move |_| refresh()>"Refresh"</button>
                    <button on:click=clear>"Clear"</button>
                </div>
                <pre class="log-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </div>
    }
}
