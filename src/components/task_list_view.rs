//! Task List View Component
//!
//! Ordered task rows with handle-driven reordering.
//! Rows reorder locally while the pointer passes over them; the order is
//! committed when the injected observer reports the gesture end.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_row_pointerenter, GestureObserver};

use crate::components::TaskItem;
use crate::context::use_app_context;
use crate::models::Task;
use crate::store::{dragging_id, has_no_tasks, task_list};

/// Task list view with DnD support
#[component]
pub fn TaskListView<G>(gestures: G) -> impl IntoView
where
    G: GestureObserver + 'static,
{
    let ctx = use_app_context();
    let store = ctx.store;

    ctx.reconciler().bind_gesture_end(&gestures);

    let tasks = move || task_list(&store).as_slice().to_vec();
    let list_class = move || {
        if dragging_id(&store).is_some() { "task-list reordering" } else { "task-list" }
    };

    view! {
        <div class=list_class>
            <Show when=move || has_no_tasks(&store)>
                <p class="empty-state">"No tasks yet"</p>
            </Show>
            <For
                each=tasks
                key=|task: &Task| task.id
                children=move |task: Task| {
                    let id = task.id;
                    let on_pointerenter = make_on_row_pointerenter(move || {
                        ctx.reconciler().drag_over(id);
                    });

                    view! {
                        <div class="task-wrapper" on:pointerenter=on_pointerenter>
                            <TaskItem task=task />
                        </div>
                    }
                }
            />
        </div>
    }
}
