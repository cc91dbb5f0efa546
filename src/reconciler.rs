//! Task List Reconciler
//!
//! Owns the ordered task collection and keeps it in step with the remote
//! store. Create, toggle, delete and rename apply only after the server
//! confirms. Reordering is applied locally while dragging and committed
//! in one call when the gesture ends.

use std::rc::Rc;

use leptos::task::spawn_local;
use leptos_dragdrop::{Gesture, GestureObserver};

use crate::api::{ApiError, ApiResult, TaskApi};
use crate::models::{Task, TaskId, TaskPosition};
use crate::task_list::TaskList;

/// Where the reconciler keeps its state.
/// Every write replaces a whole value.
pub trait TaskCell {
    fn current_tasks(&self) -> TaskList;
    fn replace_tasks(&self, tasks: TaskList);
    fn is_adding(&self) -> bool;
    fn set_adding(&self, adding: bool);
    fn current_gesture(&self) -> Gesture<TaskId>;
    fn replace_gesture(&self, gesture: Gesture<TaskId>);
    fn record_error(&self, message: Option<String>);
}

pub struct Reconciler<A, C> {
    api: A,
    state: C,
}

impl<A: TaskApi, C: TaskCell> Reconciler<A, C> {
    pub fn new(api: A, state: C) -> Self {
        Self { api, state }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial fetch. Returns the number of tasks loaded.
    pub async fn load(&self) -> ApiResult<usize> {
        match self.api.list().await {
            Ok(tasks) if tasks.is_empty() => {
                log::info!("[LOAD] No tasks found");
                Ok(0)
            }
            Ok(tasks) => {
                let list = TaskList::from_server(tasks);
                let count = list.len();
                self.state.replace_tasks(list);
                log::info!("[LOAD] Loaded {} tasks", count);
                Ok(count)
            }
            Err(e) => Err(self.report("load tasks", e)),
        }
    }

    /// Create a task and put it first. Returns `Ok(None)` without calling
    /// the server while another create is in flight.
    pub async fn create(&self, title: &str) -> ApiResult<Option<Task>> {
        if self.state.is_adding() {
            log::debug!("[TASK] Add already in progress, ignoring {:?}", title);
            return Ok(None);
        }
        self.state.set_adding(true);
        let result = self.api.create(title).await;
        self.state.set_adding(false);

        match result {
            Ok(task) => {
                let list = self.state.current_tasks().prepend(task.clone());
                self.state.replace_tasks(list);
                log::info!("[TASK] Created task {}", task.id);
                Ok(Some(task))
            }
            Err(e) => Err(self.report("add task", e)),
        }
    }

    /// Flip `completed` on the server, then locally
    pub async fn toggle(&self, id: TaskId) -> ApiResult<Option<Task>> {
        let Some(task) = self.state.current_tasks().get(id).cloned() else {
            log::debug!("[TASK] Toggle for unknown task {}", id);
            return Ok(None);
        };
        match self.api.update(&task.toggled()).await {
            Ok(updated) => Ok(self.apply(updated)),
            Err(e) => Err(self.report("update task", e)),
        }
    }

    /// Delete on the server, then locally. Returns whether a local entry was removed.
    pub async fn delete(&self, id: TaskId) -> ApiResult<bool> {
        match self.api.delete(id).await {
            Ok(()) => match self.state.current_tasks().remove(id) {
                Some(list) => {
                    self.state.replace_tasks(list);
                    log::info!("[TASK] Deleted task {}", id);
                    Ok(true)
                }
                None => {
                    log::debug!("[TASK] Task {} already gone locally", id);
                    Ok(false)
                }
            },
            Err(e) => Err(self.report("delete task", e)),
        }
    }

    /// Save a new title through the dedicated rename call
    pub async fn rename(&self, id: TaskId, title: &str) -> ApiResult<Option<Task>> {
        match self.api.rename(id, title).await {
            Ok(updated) => Ok(self.apply(updated)),
            Err(e) => Err(self.report("rename task", e)),
        }
    }

    /// Pointer down on a drag handle
    pub fn begin_drag(&self, id: TaskId) -> bool {
        if !self.state.current_tasks().contains(id) {
            return false;
        }
        match self.state.current_gesture().start(id) {
            Some(gesture) => {
                self.state.replace_gesture(gesture);
                log::debug!("[DND] Drag start: {}", id);
                true
            }
            None => false,
        }
    }

    /// Pointer over another row while dragging: local splice, no I/O
    pub fn drag_over(&self, over: TaskId) -> bool {
        let Some(dragged) = self.state.current_gesture().dragging() else {
            return false;
        };
        match self.state.current_tasks().move_over(dragged, over) {
            Some(list) => {
                self.state.replace_tasks(list);
                true
            }
            None => false,
        }
    }

    /// Pointer released anywhere. Returns the positions to commit when a
    /// drag was active.
    pub fn end_drag(&self) -> Option<Vec<TaskPosition>> {
        let (next, released) = self.state.current_gesture().release();
        self.state.replace_gesture(next);
        let dragged = released?;
        let positions = self.state.current_tasks().positions();
        log::debug!("[DND] Drop: {}, committing {} positions", dragged, positions.len());
        Some(positions)
    }

    /// Persist a full order. Local order is left as-is on failure.
    pub async fn commit_order(&self, positions: &[TaskPosition]) -> ApiResult<()> {
        let result = self.api.reorder(positions).await;
        self.state.replace_gesture(self.state.current_gesture().settle());
        match result {
            Ok(()) => {
                log::info!("[DND] Reordered tasks saved");
                Ok(())
            }
            Err(e) => Err(self.report("save order", e)),
        }
    }

    /// `end_drag` followed by `commit_order`. Returns whether anything was committed.
    pub async fn release(&self) -> ApiResult<bool> {
        match self.end_drag() {
            Some(positions) => self.commit_order(&positions).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Swap in a confirmed entity; completions for removed tasks are dropped
    fn apply(&self, task: Task) -> Option<Task> {
        match self.state.current_tasks().replace(task.clone()) {
            Some(list) => {
                self.state.replace_tasks(list);
                Some(task)
            }
            None => {
                log::debug!("[TASK] Ignoring response for removed task {}", task.id);
                None
            }
        }
    }

    fn report(&self, action: &str, error: ApiError) -> ApiError {
        log::error!("[TASK] Failed to {}: {}", action, error);
        self.state.record_error(Some(format!("Could not {}: {}", action, error)));
        error
    }
}

impl<A, C> Reconciler<A, C>
where
    A: TaskApi + 'static,
    C: TaskCell + 'static,
{
    /// Commit on every gesture end the observer reports
    pub fn bind_gesture_end<O: GestureObserver>(self: &Rc<Self>, observer: &O) {
        let this = Rc::clone(self);
        observer.on_gesture_end(Box::new(move || {
            if let Some(positions) = this.end_drag() {
                let this = Rc::clone(&this);
                spawn_local(async move {
                    let _ = this.commit_order(&positions).await;
                });
            }
        }));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators for reconciler tests.

    use super::*;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    #[derive(Clone, Default)]
    pub struct LocalCell(pub Rc<RefCell<crate::store::TaskState>>);

    impl LocalCell {
        pub fn ids(&self) -> Vec<TaskId> {
            self.0.borrow().tasks.ids()
        }

        pub fn last_error(&self) -> Option<String> {
            self.0.borrow().last_error.clone()
        }
    }

    impl TaskCell for LocalCell {
        fn current_tasks(&self) -> TaskList {
            self.0.borrow().tasks.clone()
        }
        fn replace_tasks(&self, tasks: TaskList) {
            self.0.borrow_mut().tasks = tasks;
        }
        fn is_adding(&self) -> bool {
            self.0.borrow().adding
        }
        fn set_adding(&self, adding: bool) {
            self.0.borrow_mut().adding = adding;
        }
        fn current_gesture(&self) -> Gesture<TaskId> {
            self.0.borrow().gesture
        }
        fn replace_gesture(&self, gesture: Gesture<TaskId>) {
            self.0.borrow_mut().gesture = gesture;
        }
        fn record_error(&self, message: Option<String>) {
            self.0.borrow_mut().last_error = message;
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        Create(String),
        Update(Task),
        Delete(TaskId),
        Reorder(Vec<TaskPosition>),
        Rename(TaskId, String),
    }

    /// Remote store stand-in that persists what it is told
    #[derive(Default)]
    pub struct FakeApi {
        pub rows: RefCell<Vec<Task>>,
        pub calls: RefCell<Vec<Call>>,
        failing: RefCell<HashSet<&'static str>>,
        next_id: Cell<TaskId>,
        /// Runs while a call is "in flight", before the reply
        in_flight: RefCell<Option<Box<dyn FnOnce()>>>,
    }

    impl FakeApi {
        pub fn with_rows(rows: Vec<Task>) -> Self {
            let next = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let api = FakeApi::default();
            *api.rows.borrow_mut() = rows;
            api.next_id.set(next);
            api
        }

        pub fn fail(&self, op: &'static str) {
            self.failing.borrow_mut().insert(op);
        }

        pub fn during_next_call(&self, f: impl FnOnce() + 'static) {
            *self.in_flight.borrow_mut() = Some(Box::new(f));
        }

        pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }

        fn enter(&self, op: &'static str, call: Call) -> ApiResult<()> {
            self.calls.borrow_mut().push(call);
            if let Some(f) = self.in_flight.borrow_mut().take() {
                f();
            }
            if self.failing.borrow().contains(op) {
                return Err(ApiError::Status { status: 500, body: format!("{} failed", op) });
            }
            Ok(())
        }

        fn find(&self, id: TaskId) -> ApiResult<Task> {
            self.rows
                .borrow()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or(ApiError::Status { status: 404, body: "Task not found".into() })
        }

        fn store(&self, task: Task) {
            let mut rows = self.rows.borrow_mut();
            if let Some(row) = rows.iter_mut().find(|t| t.id == task.id) {
                *row = task;
            }
        }
    }

    #[async_trait(?Send)]
    impl TaskApi for FakeApi {
        async fn list(&self) -> ApiResult<Vec<Task>> {
            self.enter("list", Call::List)?;
            let mut rows = self.rows.borrow().clone();
            rows.sort_by_key(|t| t.position);
            Ok(rows)
        }

        async fn create(&self, title: &str) -> ApiResult<Task> {
            self.enter("create", Call::Create(title.to_string()))?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            // fresh rows have no position until the first reorder
            let reply = serde_json::json!({
                "id": id,
                "title": title,
                "completed": false,
                "createdAt": "2024-03-01T09:15:30.123456",
                "position": null,
            });
            let task: Task = serde_json::from_value(reply).map_err(|e| ApiError::Parse(e.to_string()))?;
            self.rows.borrow_mut().push(task.clone());
            Ok(task)
        }

        async fn update(&self, task: &Task) -> ApiResult<Task> {
            self.enter("update", Call::Update(task.clone()))?;
            let mut row = self.find(task.id)?;
            row.title = task.title.clone();
            row.completed = task.completed;
            self.store(row.clone());
            Ok(row)
        }

        async fn delete(&self, id: TaskId) -> ApiResult<()> {
            self.enter("delete", Call::Delete(id))?;
            self.find(id)?;
            self.rows.borrow_mut().retain(|t| t.id != id);
            Ok(())
        }

        async fn reorder(&self, positions: &[TaskPosition]) -> ApiResult<()> {
            self.enter("reorder", Call::Reorder(positions.to_vec()))?;
            for p in positions {
                let mut row = self.find(p.id)?;
                row.position = p.position as i32;
                self.store(row);
            }
            Ok(())
        }

        async fn rename(&self, id: TaskId, title: &str) -> ApiResult<Task> {
            self.enter("rename", Call::Rename(id, title.to_string()))?;
            let mut row = self.find(id)?;
            row.title = title.to_string();
            self.store(row.clone());
            Ok(row)
        }
    }
}
