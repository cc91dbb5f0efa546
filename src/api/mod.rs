//! Task API Client
//!
//! The only boundary that issues network calls. Every operation returns
//! `ApiResult`, whatever went wrong.

mod tasks;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Task, TaskId, TaskPosition};

pub use tasks::HttpTaskApi;

/// Why a call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Parse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote task store
#[async_trait(?Send)]
pub trait TaskApi {
    /// GET /tasks/ in server order
    async fn list(&self) -> ApiResult<Vec<Task>>;

    /// POST /tasks/
    async fn create(&self, title: &str) -> ApiResult<Task>;

    /// PUT /tasks/{id} with the full task
    async fn update(&self, task: &Task) -> ApiResult<Task>;

    /// DELETE /tasks/{id}
    async fn delete(&self, id: TaskId) -> ApiResult<()>;

    /// POST /tasks/reorder with every position
    async fn reorder(&self, positions: &[TaskPosition]) -> ApiResult<()>;

    /// PATCH /tasks/{id}/title
    async fn rename(&self, id: TaskId, title: &str) -> ApiResult<Task>;
}
