//! Utilities to track the progression of a task list load

use std::fmt::{Display, Error, Formatter};

/// The state of the last load of the task list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The task list has been replaced
    Loaded{ count: usize },
    /// The last load failed. The previous task list is still displayed.
    Failed{ message: String },
}

impl Display for LoadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadState::Idle => write!(f, "Not loaded"),
            LoadState::Loading => write!(f, "Loading tasks..."),
            LoadState::Loaded{count} => write!(f, "{} task(s) loaded", count),
            LoadState::Failed{message} => write!(f, "Unable to load tasks: {}", message),
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Idle
    }
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadState>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadState>;

/// Create a feeback channel, that can be used to retrieve the current state of the task list
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadState::default())
}
