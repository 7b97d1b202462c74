//! An in-process task store
//!
//! It behaves like the remote REST store (it assigns IDs and creation dates, and it is the only
//! owner of the tasks), which makes it suitable to mock the server in tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::error::StoreError;
use crate::form::NewTask;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{Task, TaskId};
use crate::timestamp::Timestamp;
use crate::traits::TaskStore;

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    behaviour: MockBehaviour,
    /// How many requests have been received
    requests: usize,
}

/// A [`TaskStore`] that keeps its tasks in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already contains some tasks (e.g. tasks deserialized from a fixture)
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter()
            .filter_map(|t| match t.id() {
                TaskId::Number(n) => Some(*n),
                TaskId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(Inner { tasks, next_id, ..Inner::default() }),
        }
    }

    /// Make the next calls fail or succeed, see [`MockBehaviour`]
    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        self.lock().behaviour = behaviour;
    }

    /// A copy of the stored tasks
    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// How many calls this store has received, including failed ones
    pub fn request_count(&self) -> usize {
        self.lock().requests
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl Inner {
    fn position(&self, id: &TaskId) -> Result<usize, StoreError> {
        self.tasks.iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn build_task(id: TaskId, payload: &NewTask, completed: bool, created_at: Timestamp) -> Task {
    let task = Task::new(id, &payload.title, payload.due_date.clone(), completed, payload.priority.clone())
        .with_created_at(created_at);
    if payload.description.is_empty() {
        task
    } else {
        task.with_description(&payload.description)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut inner = self.lock();
        inner.requests += 1;
        inner.behaviour.can_list()?;
        Ok(inner.tasks.clone())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        inner.requests += 1;
        inner.behaviour.can_create()?;

        inner.next_id += 1;
        let id = TaskId::Number(inner.next_id);
        let created = build_task(id, task, false, Timestamp::from_local(Self::now()));
        inner.tasks.push(created.clone());
        log::debug!("Memory store: created task {}", created.id());
        Ok(created)
    }

    async fn update(&self, id: &TaskId, task: &NewTask) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        inner.requests += 1;
        inner.behaviour.can_update()?;

        let index = inner.position(id)?;
        let previous = &inner.tasks[index];
        let created_at = previous.created_at().cloned().unwrap_or_else(|| Timestamp::from_local(Self::now()));
        let updated = build_task(id.clone(), task, previous.completed(), created_at);
        inner.tasks[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.requests += 1;
        inner.behaviour.can_delete()?;

        let index = inner.position(id)?;
        inner.tasks.remove(index);
        Ok(())
    }

    async fn toggle_completion(&self, id: &TaskId) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        inner.requests += 1;
        inner.behaviour.can_toggle()?;

        let index = inner.position(id)?;
        let toggled = inner.tasks[index].toggled();
        inner.tasks[index] = toggled.clone();
        Ok(toggled)
    }
}
