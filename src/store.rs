//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use leptos_dragdrop::Gesture;
use reactive_stores::Store;

use crate::models::{Task, TaskId};
use crate::reconciler::TaskCell;
use crate::task_list::TaskList;

/// Task list state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TaskState {
    /// Confirmed tasks in display order
    pub tasks: TaskList,
    /// A create call is in flight
    pub adding: bool,
    /// Reorder gesture in progress
    pub gesture: Gesture<TaskId>,
    /// Last reported failure, shown until dismissed
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<TaskState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

impl TaskCell for AppStore {
    fn current_tasks(&self) -> TaskList {
        self.tasks().get_untracked()
    }

    fn replace_tasks(&self, tasks: TaskList) {
        self.tasks().set(tasks);
    }

    fn is_adding(&self) -> bool {
        self.adding().get_untracked()
    }

    fn set_adding(&self, adding: bool) {
        self.adding().set(adding);
    }

    fn current_gesture(&self) -> Gesture<TaskId> {
        self.gesture().get_untracked()
    }

    fn replace_gesture(&self, gesture: Gesture<TaskId>) {
        self.gesture().set(gesture);
    }

    fn record_error(&self, message: Option<String>) {
        self.last_error().set(message);
    }
}

/// Id of the task being dragged, tracked
pub fn dragging_id(store: &AppStore) -> Option<TaskId> {
    store.gesture().get().dragging()
}

/// Clear the error banner
pub fn dismiss_error(store: &AppStore) {
    store.last_error().set(None);
}

/// Tracked snapshot of the ordered tasks
pub fn task_list(store: &AppStore) -> TaskList {
    store.tasks().get()
}

/// Tracked lookup of one task
pub fn task_by_id(store: &AppStore, id: TaskId) -> Option<Task> {
    store.tasks().with(|list| list.get(id).cloned())
}

pub fn has_no_tasks(store: &AppStore) -> bool {
    store.tasks().with(|list| list.is_empty())
}

pub fn task_count(store: &AppStore) -> usize {
    store.tasks().with(|list| list.len())
}

pub fn is_adding(store: &AppStore) -> bool {
    store.adding().get()
}

pub fn last_error(store: &AppStore) -> Option<String> {
    store.last_error().get()
}
