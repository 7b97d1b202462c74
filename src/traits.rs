use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::bucketing;
use crate::error::StoreError;
use crate::form::NewTask;
use crate::task::{Priority, Task, TaskId};

/// A remote service that owns the tasks.
///
/// It is the only source of truth: clients never patch their local copy, they fetch the whole
/// task list again after every change.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task
    async fn list(&self) -> Result<Vec<Task>, StoreError>;
    /// Create a task. The store assigns its ID and creation date.
    async fn create(&self, task: &NewTask) -> Result<Task, StoreError>;
    /// Replace the editable fields of a task
    async fn update(&self, id: &TaskId, task: &NewTask) -> Result<Task, StoreError>;
    async fn delete(&self, id: &TaskId) -> Result<(), StoreError>;
    /// Flip the completion of a task, and return the updated task
    async fn toggle_completion(&self, id: &TaskId) -> Result<Task, StoreError>;

    //
    // Optional read filters.
    // The default implementations filter the whole list locally; stores that provide dedicated queries may override them.
    //

    async fn list_by_priority(&self, priority: &Priority) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list().await?;
        Ok(tasks.into_iter().filter(|t| t.priority() == priority).collect())
    }

    /// Tasks due between `start` and `end`, both included
    async fn list_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list().await?;
        Ok(tasks.into_iter()
            .filter(|t| match t.due() {
                Some(due) => start <= due && due <= end,
                None => false,
            })
            .collect())
    }

    /// Overdue tasks. Stores that compute this themselves use their own clock rather than `now`
    async fn list_overdue(&self, now: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list().await?;
        Ok(tasks.into_iter().filter(|t| bucketing::is_overdue(t, now)).collect())
    }

    /// Upcoming tasks within the default horizon. Stores that compute this themselves use their own clock rather than `now`
    async fn list_upcoming(&self, now: NaiveDateTime) -> Result<Vec<Task>, StoreError> {
        let tasks = self.list().await?;
        let horizon = bucketing::default_horizon();
        Ok(tasks.into_iter().filter(|t| bucketing::is_upcoming(t, now, horizon)).collect())
    }

    /// Tasks whose title or description contains `keyword`, case-insensitively
    async fn search(&self, keyword: &str) -> Result<Vec<Task>, StoreError> {
        let needle = keyword.to_lowercase();
        let tasks = self.list().await?;
        Ok(tasks.into_iter()
            .filter(|t| {
                t.title().to_lowercase().contains(&needle)
                    || t.description().map(|d| d.to_lowercase().contains(&needle)).unwrap_or(false)
            })
            .collect())
    }
}
