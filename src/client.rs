//! This module provides a client to connect to the task store REST API

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::StoreError;
use crate::form::NewTask;
use crate::task::{Priority, Task, TaskId};
use crate::traits::TaskStore;

/// The format of the bounds of a date-range query
const RANGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";


/// A task store that is reached over HTTP
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.as_ref())?;
        Self::with_url(base_url)
    }

    /// Create a client for the base URL of the library configuration (see [`crate::config::API_BASE_URL`])
    pub fn from_config() -> Result<Self, StoreError> {
        Self::with_url(crate::config::api_base_url()?)
    }

    fn with_url(base_url: Url) -> Result<Self, StoreError> {
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        log::debug!("Task store is at {}", base_url);
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base URL>/<segments...>`
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn task_endpoint(&self, id: &TaskId, suffix: Option<&str>) -> Url {
        let id = id.to_string();
        match suffix {
            None => self.endpoint(&["tasks", &id]),
            Some(suffix) => self.endpoint(&["tasks", &id, suffix]),
        }
    }

    /// Send a request, and turn a non-success status into an error
    async fn send_raw(&self, request: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() == false {
            let body = response.text().await.unwrap_or_default();
            log::error!("HTTP Error {}: {}", status.as_u16(), body);
            return Err(StoreError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    /// Send a request, and decode its JSON answer (if any)
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>, StoreError> {
        let response = self.send_raw(request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn send_expecting<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        self.send(request).await?.ok_or(StoreError::EmptyResponse)
    }

    async fn get_tasks(&self, url: Url) -> Result<Vec<Task>, StoreError> {
        log::debug!("GET {}", url);
        let tasks: Vec<Task> = self.send_expecting(
            self.http.get(url).header(CONTENT_TYPE, "application/json")
        ).await?;
        log::debug!("Received {} tasks", tasks.len());
        Ok(tasks)
    }
}

#[async_trait]
impl TaskStore for Client {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.get_tasks(self.endpoint(&["tasks"])).await
    }

    async fn create(&self, task: &NewTask) -> Result<Task, StoreError> {
        let created: Task = self.send_expecting(
            self.http.post(self.endpoint(&["tasks"])).json(task)
        ).await?;
        log::info!("Created task {}", created.id());
        Ok(created)
    }

    async fn update(&self, id: &TaskId, task: &NewTask) -> Result<Task, StoreError> {
        let updated: Task = self.send_expecting(
            self.http.put(self.task_endpoint(id, None)).json(task)
        ).await?;
        log::info!("Updated task {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        // The body of a successful deletion is ignored
        self.send_raw(self.http.delete(self.task_endpoint(id, None))).await?;
        log::info!("Deleted task {}", id);
        Ok(())
    }

    async fn toggle_completion(&self, id: &TaskId) -> Result<Task, StoreError> {
        let toggled: Task = self.send_expecting(
            self.http.patch(self.task_endpoint(id, Some("toggle")))
        ).await?;
        log::info!("Task {} is now {}", id, if toggled.completed() { "completed" } else { "pending" });
        Ok(toggled)
    }

    async fn list_by_priority(&self, priority: &Priority) -> Result<Vec<Task>, StoreError> {
        self.get_tasks(self.endpoint(&["tasks", "priority", priority.as_str()])).await
    }

    async fn list_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        let mut url = self.endpoint(&["tasks", "date-range"]);
        url.query_pairs_mut()
            .append_pair("startDate", &start.format(RANGE_FORMAT).to_string())
            .append_pair("endDate", &end.format(RANGE_FORMAT).to_string());
        self.get_tasks(url).await
    }

    async fn list_overdue(&self, _now: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        self.get_tasks(self.endpoint(&["tasks", "overdue"])).await
    }

    async fn list_upcoming(&self, _now: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        self.get_tasks(self.endpoint(&["tasks", "upcoming"])).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Task>, StoreError> {
        let mut url = self.endpoint(&["tasks", "search"]);
        url.query_pairs_mut().append_pair("keyword", keyword);
        self.get_tasks(url).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let client = Client::new("http://localhost:8080/api").unwrap();
        assert_eq!(client.endpoint(&["tasks"]).as_str(), "http://localhost:8080/api/tasks");
        assert_eq!(client.task_endpoint(&TaskId::Number(12), Some("toggle")).as_str(), "http://localhost:8080/api/tasks/12/toggle");
        assert_eq!(client.task_endpoint(&TaskId::Text("a b".to_string()), None).as_str(), "http://localhost:8080/api/tasks/a%20b");

        let trailing = Client::new("https://example.com/api/").unwrap();
        assert_eq!(trailing.endpoint(&["tasks", "overdue"]).as_str(), "https://example.com/api/tasks/overdue");
    }

    #[test]
    fn invalid_base_urls() {
        assert!(Client::new("not a url").is_err());
        assert!(Client::new("mailto:someone@example.com").is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let _ = env_logger::builder().is_test(true).try_init();

        let client = Client::new("http://127.0.0.1:9/api").unwrap();
        match client.list().await {
            Err(StoreError::Http(_)) => (),
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
