//! UI Components
//!
//! Reusable Leptos components.

mod task_item;
mod task_list_view;
mod new_task_form;
mod error_banner;
mod log_panel;

pub use task_item::TaskItem;
pub use task_list_view::TaskListView;
pub use new_task_form::NewTaskForm;
pub use error_banner::ErrorBanner;
pub use log_panel::LogPanel;
