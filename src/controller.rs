//! Task Item Controller
//!
//! Mediates one task row: a local title draft, debounced rename, and the
//! toggle/delete/drag intents. Never talks to the network itself.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::debounce::Debounced;
use crate::models::{Task, TaskId};
use crate::timer::Timer;

/// What a row asks its list to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    Toggle(TaskId),
    Delete(TaskId),
    Rename { id: TaskId, title: String },
    DragStart(TaskId),
}

pub type IntentSink = Rc<dyn Fn(TaskIntent)>;

pub struct TaskItemController<M: Timer> {
    id: TaskId,
    /// Last title the server confirmed
    confirmed: Rc<RefCell<String>>,
    draft: RefCell<String>,
    title: Debounced<String, M>,
    emit: IntentSink,
}

impl<M> TaskItemController<M>
where
    M: Timer,
    M::Handle: 'static,
{
    pub fn new(task: &Task, delay: Duration, timer: M, emit: IntentSink) -> Self {
        let confirmed = Rc::new(RefCell::new(task.title.clone()));
        let title = Debounced::new(task.title.clone(), delay, timer);

        let id = task.id;
        let guard = confirmed.clone();
        let sink = emit.clone();
        title.on_settle(move |stable: String| {
            if *guard.borrow() != stable {
                sink(TaskIntent::Rename { id, title: stable });
            }
        });

        Self {
            id,
            confirmed,
            draft: RefCell::new(task.title.clone()),
            title,
            emit,
        }
    }

    /// Keystroke in the title field
    pub fn edit(&self, text: String) {
        *self.draft.borrow_mut() = text.clone();
        self.title.set(text);
    }

    pub fn draft(&self) -> String {
        self.draft.borrow().clone()
    }

    /// A newer confirmed version of this task arrived. The draft is kept.
    pub fn sync(&self, task: &Task) {
        if task.id == self.id {
            *self.confirmed.borrow_mut() = task.title.clone();
        }
    }

    pub fn toggle(&self) {
        (self.emit)(TaskIntent::Toggle(self.id));
    }

    pub fn delete(&self) {
        (self.emit)(TaskIntent::Delete(self.id));
    }

    /// Pointer down on the drag handle
    pub fn begin_drag(&self) {
        (self.emit)(TaskIntent::DragStart(self.id));
    }

    /// Row is going away: drop any pending rename
    pub fn dispose(&self) {
        self.title.cancel();
    }
}
