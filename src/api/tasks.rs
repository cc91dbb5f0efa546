//! HTTP Task API
//!
//! `TaskApi` over the task REST endpoints, JSON in and out.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, TaskApi};
use crate::config::AppConfig;
use crate::models::{NewTask, ReorderRequest, Task, TaskId, TaskPosition, TitleUpdate};

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    fn title_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}/title", self.base_url, id)
    }

    fn reorder_url(&self) -> String {
        format!("{}/tasks/reorder", self.base_url)
    }

    /// Send and decode a JSON body
    async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let body = Self::fetch_text(request).await?;
        decode(&body)
    }

    /// Send and check status only
    async fn fetch_status(request: RequestBuilder) -> ApiResult<()> {
        Self::fetch_text(request).await.map(|_| ())
    }

    async fn fetch_text(request: RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> ApiResult<Vec<Task>> {
        Self::fetch_json(self.client.get(self.collection_url())).await
    }

    async fn create(&self, title: &str) -> ApiResult<Task> {
        let request = self.client.post(self.collection_url()).json(&NewTask { title });
        Self::fetch_json(request).await
    }

    async fn update(&self, task: &Task) -> ApiResult<Task> {
        let request = self.client.put(self.task_url(task.id)).json(task);
        Self::fetch_json(request).await
    }

    async fn delete(&self, id: TaskId) -> ApiResult<()> {
        Self::fetch_status(self.client.delete(self.task_url(id))).await
    }

    async fn reorder(&self, positions: &[TaskPosition]) -> ApiResult<()> {
        let request = self
            .client
            .post(self.reorder_url())
            .json(&ReorderRequest { tasks: positions });
        Self::fetch_status(request).await
    }

    async fn rename(&self, id: TaskId, title: &str) -> ApiResult<Task> {
        let request = self.client.patch(self.title_url(id)).json(&TitleUpdate { title });
        Self::fetch_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpTaskApi {
        HttpTaskApi::new(&AppConfig::from_values(Some("http://localhost:8000/"), None, None))
    }

    #[test]
    fn test_urls() {
        let api = api();
        assert_eq!(api.collection_url(), "http://localhost:8000/tasks/");
        assert_eq!(api.task_url(12), "http://localhost:8000/tasks/12");
        assert_eq!(api.title_url(12), "http://localhost:8000/tasks/12/title");
        assert_eq!(api.reorder_url(), "http://localhost:8000/tasks/reorder");
    }

    #[test]
    fn test_request_shapes() {
        let api = api();
        let positions = [TaskPosition { id: 2, position: 0 }];
        let request = api
            .client
            .post(api.reorder_url())
            .json(&ReorderRequest { tasks: &positions })
            .build()
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"tasks":[{"id":2,"position":0}]}"#);
    }

    #[test]
    fn test_decode_errors_are_parse_errors() {
        let result: ApiResult<Task> = decode(r#"{"message":"Tasks reordered successfully"}"#);
        assert!(matches!(result, Err(ApiError::Parse(_))));

        let tasks: Vec<Task> = decode("[]").unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let api = HttpTaskApi::new(&AppConfig::from_values(Some("http://127.0.0.1:1"), None, None));
        let result = api.list().await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
