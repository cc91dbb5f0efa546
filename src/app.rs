//! Task List Frontend App
//!
//! Main application component: header with the add form, the task list,
//! and a task count.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::WindowGestures;
use reactive_stores::Store;

use crate::api::HttpTaskApi;
use crate::components::{ErrorBanner, LogPanel, NewTaskForm, TaskListView};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::reconciler::Reconciler;
use crate::store::{task_count, TaskState};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let store = Store::new(TaskState::default());
    let reconciler = Rc::new(Reconciler::new(HttpTaskApi::new(&config), store));

    // Provide context to all children
    provide_context(store);
    let ctx = AppContext::new(store, reconciler, config);
    provide_context(ctx);

    // Load tasks on mount
    Effect::new(move |_| {
        let reconciler = ctx.reconciler();
        log::debug!("[APP] Loading tasks from {}", ctx.config().api_url);
        spawn_local(async move {
            let _ = reconciler.load().await;
        });
    });

    view! {
        <div id="app">
            <div id="main-wrapper">
                <header>
                    <h1 class="app-title">"Tasks"</h1>
                    <NewTaskForm />
                </header>

                <ErrorBanner />

                <TaskListView gestures=WindowGestures />

                <p class="task-count">{move || format!("{} tasks", task_count(&store))}</p>

                <LogPanel />
            </div>
        </div>
    }
}
