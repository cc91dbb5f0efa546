//! Frontend Models
//!
//! Data structures matching the task API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned task identifier
pub type TaskId = u32;

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Display order. Locally always equal to the list index.
    /// Rows never reordered come back with `null`.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub position: i32,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Copy with `completed` flipped
    pub fn toggled(&self) -> Task {
        Task {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Body for POST /tasks/
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
}

/// Body for PATCH /tasks/{id}/title
#[derive(Debug, Serialize)]
pub struct TitleUpdate<'a> {
    pub title: &'a str,
}

/// One entry of a reorder payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPosition {
    pub id: TaskId,
    pub position: usize,
}

/// Body for POST /tasks/reorder
#[derive(Debug, Serialize)]
pub struct ReorderRequest<'a> {
    pub tasks: &'a [TaskPosition],
}
