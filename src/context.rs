//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTaskApi;
use crate::config::AppConfig;
use crate::controller::TaskIntent;
use crate::reconciler::Reconciler;
use crate::store::AppStore;

pub type AppReconciler = Reconciler<HttpTaskApi, AppStore>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Task state
    pub store: AppStore,
    /// Reconciler, local to the UI thread
    reconciler: StoredValue<Rc<AppReconciler>, LocalStorage>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(store: AppStore, reconciler: Rc<AppReconciler>, config: AppConfig) -> Self {
        Self {
            store,
            reconciler: StoredValue::new_local(reconciler),
            config: StoredValue::new(config),
        }
    }

    pub fn reconciler(&self) -> Rc<AppReconciler> {
        self.reconciler.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Route a row intent to the reconciler. Failures are already reported there.
    pub fn dispatch(&self, intent: TaskIntent) {
        let reconciler = self.reconciler();
        match intent {
            TaskIntent::DragStart(id) => {
                reconciler.begin_drag(id);
            }
            TaskIntent::Toggle(id) => spawn_local(async move {
                let _ = reconciler.toggle(id).await;
            }),
            TaskIntent::Delete(id) => spawn_local(async move {
                let _ = reconciler.delete(id).await;
            }),
            TaskIntent::Rename { id, title } => spawn_local(async move {
                let _ = reconciler.rename(id, &title).await;
            }),
        }
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
