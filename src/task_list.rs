//! Ordered Task Collection
//!
//! Immutable-by-value list of tasks. Every operation returns a new list;
//! `position` is rewritten from the index each time, so it never drifts
//! from the on-screen order.

use std::collections::HashSet;

use leptos_dragdrop::reorder_by_key;

use crate::models::{Task, TaskId, TaskPosition};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList(Vec<Task>);

impl TaskList {
    /// Build from a server response, keeping server order.
    /// Later duplicates of an id are dropped.
    pub fn from_server(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let tasks = tasks.into_iter().filter(|t| seen.insert(t.id)).collect();
        Self::renumbered(tasks)
    }

    fn renumbered(mut tasks: Vec<Task>) -> Self {
        for (index, task) in tasks.iter_mut().enumerate() {
            task.position = index as i32;
        }
        TaskList(tasks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.0.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.0.iter().map(|t| t.id).collect()
    }

    /// New list with `task` in front. An existing entry with the same id is dropped.
    pub fn prepend(&self, task: Task) -> Self {
        let mut tasks = Vec::with_capacity(self.0.len() + 1);
        let id = task.id;
        tasks.push(task);
        tasks.extend(self.0.iter().filter(|t| t.id != id).cloned());
        Self::renumbered(tasks)
    }

    /// New list with the entry of the same id replaced, or None if absent
    pub fn replace(&self, task: Task) -> Option<Self> {
        let index = self.0.iter().position(|t| t.id == task.id)?;
        let mut tasks = self.0.clone();
        tasks[index] = task;
        Some(Self::renumbered(tasks))
    }

    /// New list without `id`, or None if absent
    pub fn remove(&self, id: TaskId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let tasks = self.0.iter().filter(|t| t.id != id).cloned().collect();
        Some(Self::renumbered(tasks))
    }

    /// New list with `dragged` moved into the slot held by `over`, or None if nothing moved
    pub fn move_over(&self, dragged: TaskId, over: TaskId) -> Option<Self> {
        let mut tasks = self.0.clone();
        if reorder_by_key(&mut tasks, |t| t.id, dragged, over) {
            Some(Self::renumbered(tasks))
        } else {
            None
        }
    }

    /// Dense zero-based positions for every task, in display order
    pub fn positions(&self) -> Vec<TaskPosition> {
        self.0
            .iter()
            .enumerate()
            .map(|(position, t)| TaskPosition { id: t.id, position })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn make_task(id: TaskId, title: &str, position: i32) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed: false,
        position,
        created_at: None,
    }
}
