//! Error types
//!
//! Three families of errors can happen in this crate:
//! * [`StoreError`]: a call to the task store failed (network, non-success status, bad payload...)
//! * [`ValidationError`]: a task form was rejected before anything was sent to the store
//! * [`InvalidTimestamp`]: a timestamp coming from the store cannot be parsed. This one is never
//!   returned by the bucketing functions, that log it and exclude the task instead.

use thiserror::Error;

/// A failed request to a [`TaskStore`](crate::traits::TaskStore)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error {status}: {}", body_or_default(.body))]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("The store sent an empty response")]
    EmptyResponse,

    #[error("No task with id {0}")]
    NotFound(String),

    #[error("Mocked behaviour requires this {0} to fail this time")]
    Mocked(String),
}

impl StoreError {
    /// The HTTP status code, when the server actually answered
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            StoreError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

fn body_or_default(body: &str) -> &str {
    if body.is_empty() { "Request failed" } else { body }
}

/// A task form that cannot be submitted
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The title is required")]
    MissingTitle,

    #[error("The due date is required")]
    MissingDueDate,

    #[error("Invalid due date {0:?} (expected YYYY-MM-DD)")]
    InvalidDueDate(String),

    #[error("Invalid due time {0:?} (expected HH:MM)")]
    InvalidDueTime(String),
}

/// A timestamp that does not parse to a valid calendar date
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unable to parse timestamp {raw:?}")]
pub struct InvalidTimestamp {
    pub raw: String,
}
