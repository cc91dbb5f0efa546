//! Task Item Component
//!
//! One task row: drag handle, checkbox, editable title, delete button.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::make_on_handle_pointerdown;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::controller::{IntentSink, TaskIntent, TaskItemController};
use crate::models::Task;
use crate::store::{dragging_id, task_by_id};
use crate::timer::BrowserTimer;

/// A single task row
#[component]
pub fn TaskItem(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let id = task.id;

    // Confirmed version of this task; None once it is deleted
    let confirmed = Memo::new(move |_| task_by_id(&store, id));

    let emit: IntentSink = Rc::new(move |intent: TaskIntent| ctx.dispatch(intent));
    let controller = TaskItemController::new(&task, ctx.config().title_debounce, BrowserTimer, emit);
    let controller = StoredValue::new_local(Rc::new(controller));

    Effect::new(move |_| {
        if let Some(latest) = confirmed.get() {
            controller.with_value(|c| c.sync(&latest));
        }
    });
    on_cleanup(move || {
        let _ = controller.try_with_value(|c| c.dispose());
    });

    let completed = move || confirmed.get().map(|t| t.completed).unwrap_or(false);
    let row_class = move || {
        let mut c = String::from("task-row");
        if completed() { c.push_str(" completed"); }
        if dragging_id(&store) == Some(id) { c.push_str(" dragging"); }
        c
    };

    let on_handle_pointerdown = make_on_handle_pointerdown(move || {
        controller.with_value(|c| c.begin_drag());
    });

    view! {
        <div class=row_class>
            <span class="reorder-handle" on:pointerdown=on_handle_pointerdown>"☰"</span>

            // Checkbox shows confirmed state only
            <input
                type="checkbox"
                prop:checked=completed
                on:change=move |ev| {
                    let shown = confirmed.get_untracked().map(|t| t.completed).unwrap_or(false);
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        input.set_checked(shown);
                    }
                    controller.with_value(|c| c.toggle());
                }
            />

            // Only typing changes the draft, so the field is seeded once
            <input
                class="task-title"
                type="text"
                prop:value=controller.with_value(|c| c.draft())
                on:input=move |ev| controller.with_value(|c| c.edit(event_target_value(&ev)))
            />

            <button class="delete-btn" on:click=move |_| controller.with_value(|c| c.delete())>"×"</button>
        </div>
    }
}
