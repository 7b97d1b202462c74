//! This module holds the working set of tasks, and keeps it consistent with a task store
//!
//! The store is the only source of truth: after every successful change, the whole task list is
//! fetched again and replaces the local one. Local tasks are never patched.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::error::{StoreError, ValidationError};
use crate::form::TaskDraft;
use crate::task::{Task, TaskId};
use crate::traits::TaskStore;

pub mod feedback;
use feedback::{FeedbackReceiver, FeedbackSender, LoadState};

/// An error returned by a [`Workspace`] operation
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A message for the user, that stays until it is dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    message: String,
}

impl Notice {
    pub fn id(&self) -> u64 { self.id }
    pub fn message(&self) -> &str { &self.message }
}

/// A token handed out when a load starts, so that out-of-order responses can be told apart
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    /// The last ticket that has been handed out
    issued: u64,
    /// The ticket of the task list that is currently held
    applied: u64,
    notices: Vec<Notice>,
    next_notice_id: u64,
}

impl State {
    fn push_notice(&mut self, message: String) -> u64 {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notices.push(Notice { id, message });
        id
    }
}


/// The task list of a session, backed by a [`TaskStore`]
#[derive(Debug)]
pub struct Workspace<S: TaskStore> {
    store: Arc<S>,
    state: Arc<Mutex<State>>,

    feedback_sender: FeedbackSender,
    feedback_receiver: FeedbackReceiver,
}

impl<S: TaskStore> Workspace<S> {
    /// Create a workspace. Its task list is empty until [`Workspace::reload`] is called.
    pub fn new(store: S) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(store: Arc<S>) -> Self {
        let (feedback_sender, feedback_receiver) = feedback::feedback_channel();
        Self {
            store,
            state: Arc::new(Mutex::new(State::default())),
            feedback_sender,
            feedback_receiver,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A receiver that is notified every time the load state changes
    pub fn feedback(&self) -> FeedbackReceiver {
        self.feedback_receiver.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.feedback_receiver.borrow().clone()
    }

    /// A copy of the current task list
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    /// Run a function on the current task list, without copying it
    pub fn with_tasks<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Task]) -> R,
    {
        f(&self.state().tasks)
    }

    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id() == id).cloned()
    }

    /// The notices that have not been dismissed yet, oldest first
    pub fn notices(&self) -> Vec<Notice> {
        self.state().notices.clone()
    }

    /// Remove a notice. Returns `false` if there was no such notice
    pub fn dismiss(&self, notice_id: u64) -> bool {
        let mut state = self.state();
        let before = state.notices.len();
        state.notices.retain(|n| n.id != notice_id);
        state.notices.len() != before
    }

    /// Start a load. The returned ticket must be given back to [`Workspace::finish_load`]
    pub fn begin_load(&self) -> LoadTicket {
        let ticket = {
            let mut state = self.state();
            state.issued += 1;
            LoadTicket(state.issued)
        };
        self.send_feedback(LoadState::Loading);
        ticket
    }

    /// Apply the result of a load.
    ///
    /// Returns `Ok(false)` when the result was discarded, because a more recent load has already been applied.
    pub fn finish_load(&self, ticket: LoadTicket, result: Result<Vec<Task>, StoreError>) -> Result<bool, StoreError> {
        let mut state = self.state();
        if ticket.0 < state.applied {
            log::debug!("Discarding the result of load #{} (#{} is already applied)", ticket.0, state.applied);
            return Ok(false);
        }

        match result {
            Ok(tasks) => {
                log::info!("Load #{}: {} task(s)", ticket.0, tasks.len());
                let count = tasks.len();
                state.tasks = tasks;
                state.applied = ticket.0;
                let is_latest = ticket.0 == state.issued;
                drop(state);

                if is_latest {
                    self.send_feedback(LoadState::Loaded{ count });
                }
                Ok(true)
            },
            Err(err) => {
                log::error!("Unable to load tasks: {}", err);
                state.push_notice(format!("Unable to load tasks: {}", err));
                drop(state);

                self.send_feedback(LoadState::Failed{ message: err.to_string() });
                Err(err)
            },
        }
    }

    /// Fetch the whole task list from the store, and replace the local one.
    ///
    /// Returns the number of tasks that are now held
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let ticket = self.begin_load();
        let result = self.store.list().await;
        self.finish_load(ticket, result)?;
        Ok(self.state().tasks.len())
    }

    /// Create a task from a form. Nothing is sent if the form is not valid.
    pub async fn create(&self, draft: &TaskDraft) -> Result<Task, WorkspaceError> {
        let payload = draft.validate()?;
        let created = self.store.create(&payload).await
            .map_err(|err| self.record_failure("create the task", err))?;
        self.reload().await?;
        Ok(created)
    }

    /// Replace the editable fields of a task. Nothing is sent if the form is not valid.
    pub async fn update(&self, id: &TaskId, draft: &TaskDraft) -> Result<Task, WorkspaceError> {
        let payload = draft.validate()?;
        let updated = self.store.update(id, &payload).await
            .map_err(|err| self.record_failure("update the task", err))?;
        self.reload().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        self.store.delete(id).await
            .map_err(|err| self.record_failure("delete the task", err))?;
        self.reload().await?;
        Ok(())
    }

    pub async fn toggle_completion(&self, id: &TaskId) -> Result<Task, StoreError> {
        let toggled = self.store.toggle_completion(id).await
            .map_err(|err| self.record_failure("update the task", err))?;
        self.reload().await?;
        Ok(toggled)
    }

    fn record_failure(&self, action: &str, err: StoreError) -> StoreError {
        log::error!("Unable to {}: {}", action, err);
        self.state().push_notice(format!("Unable to {}: {}", action, err));
        err
    }

    /// Send an event as a feedback to the listeners
    fn send_feedback(&self, event: LoadState) {
        // There is always at least one receiver (ours), this cannot fail
        let _ = self.feedback_sender.send(event);
    }

    fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use crate::mock_behaviour::MockBehaviour;
    use crate::task::Priority;
    use crate::timestamp::Timestamp;

    fn task(id: i64, title: &str) -> Task {
        Task::new(id, title, Timestamp::parse("2024-02-10T09:00"), false, Priority::Medium)
    }

    #[test]
    fn stale_results_are_discarded() {
        let workspace = Workspace::new(MemoryStore::new());
        let first = workspace.begin_load();
        let second = workspace.begin_load();
        assert!(first < second);

        assert_eq!(workspace.finish_load(second, Ok(vec![task(1, "fresh")])).unwrap(), true);
        assert_eq!(workspace.load_state(), LoadState::Loaded{ count: 1 });

        assert_eq!(workspace.finish_load(first, Ok(vec![])).unwrap(), false);
        assert_eq!(workspace.tasks().len(), 1);
        assert_eq!(workspace.tasks()[0].title(), "fresh");

        // A stale failure is ignored as well
        assert_eq!(workspace.finish_load(first, Err(StoreError::EmptyResponse)).unwrap(), false);
        assert!(workspace.notices().is_empty());
    }

    #[test]
    fn older_result_applied_first_is_replaced() {
        let workspace = Workspace::new(MemoryStore::new());
        let first = workspace.begin_load();
        let second = workspace.begin_load();

        assert!(workspace.finish_load(first, Ok(vec![task(1, "old")])).unwrap());
        // The latest load is still in flight
        assert_eq!(workspace.load_state(), LoadState::Loading);
        assert!(workspace.finish_load(second, Ok(vec![task(1, "new"), task(2, "other")])).unwrap());
        assert_eq!(workspace.tasks().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_keeps_the_tasks() {
        let store = MemoryStore::with_tasks(vec![task(1, "a"), task(2, "b")]);
        let workspace = Workspace::new(store);
        assert_eq!(workspace.reload().await.unwrap(), 2);

        workspace.store().set_behaviour(MockBehaviour::fail_now(1));
        assert!(workspace.reload().await.is_err());
        assert_eq!(workspace.tasks().len(), 2);
        match workspace.load_state() {
            LoadState::Failed{ .. } => (),
            other => panic!("Unexpected state {:?}", other),
        }

        let notices = workspace.notices();
        assert_eq!(notices.len(), 1);
        assert!(workspace.dismiss(notices[0].id()));
        assert_eq!(workspace.dismiss(notices[0].id()), false);
        assert!(workspace.notices().is_empty());
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_store() {
        let workspace = Workspace::new(MemoryStore::new());
        let draft = TaskDraft::new();
        match workspace.create(&draft).await {
            Err(WorkspaceError::Validation(ValidationError::MissingTitle)) => (),
            other => panic!("Unexpected result {:?}", other),
        }
        assert_eq!(workspace.store().request_count(), 0);
        assert!(workspace.notices().is_empty());
    }
}
