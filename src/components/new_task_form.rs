//! New Task Form Component
//!
//! Form for creating new tasks.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::is_adding;

/// Form for creating a task at the top of the list
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let (new_title, set_new_title) = signal(String::new());
    let adding = move || is_adding(&store);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get_untracked().trim().to_string();
        if title.is_empty() { return; }

        let reconciler = ctx.reconciler();
        spawn_local(async move {
            if let Ok(Some(_)) = reconciler.create(&title).await {
                set_new_title.set(String::new());
            }
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <input
                type="text"
                placeholder="Add new task..."
                prop:value=move || new_title.get()
                prop:disabled=adding
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <button type="submit" prop:disabled=adding>
                {move || if adding() { "Adding..." } else { "Add" }}
            </button>
        </form>
    }
}
