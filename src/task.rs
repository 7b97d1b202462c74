//! To-do tasks, as served by the task store

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use csscolorparser::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::timestamp::Timestamp;

/// The identifier of a task. It is assigned by the store, and may be a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self { TaskId::Number(n) }
}
impl From<i32> for TaskId {
    fn from(n: i32) -> Self { TaskId::Number(n as i64) }
}
impl From<&str> for TaskId {
    fn from(s: &str) -> Self { TaskId::Text(s.to_string()) }
}

/// Numeric-looking ids are numbers, anything else is kept as text
impl FromStr for TaskId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => TaskId::Number(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}


/// How important a task is.
///
/// Values the store sends that are not part of the known set are kept verbatim (so that they are
/// sent back unchanged), but they have no label and no color.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
    Unrecognized(String),
}

impl Priority {
    /// Every recognized priority, from the least to the most important
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    /// The wire name (e.g. `HIGH`)
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
            Priority::Unrecognized(s) => s,
        }
    }

    /// The label displayed to the user, if any
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Priority::Low => Some("Low"),
            Priority::Medium => Some("Medium"),
            Priority::High => Some("High"),
            Priority::Urgent => Some("Urgent"),
            Priority::Unrecognized(_) => None,
        }
    }

    /// The color tag of this priority, if any
    pub fn color(&self) -> Option<Color> {
        let (r, g, b) = match self {
            Priority::Low => (0x48, 0xbb, 0x78),
            Priority::Medium => (0xed, 0x89, 0x36),
            Priority::High => (0xf5, 0x65, 0x65),
            Priority::Urgent => (0xe5, 0x3e, 0x3e),
            Priority::Unrecognized(_) => return None,
        };
        Some(crate::config::rgb(r, g, b))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Priority::Low,
            "MEDIUM" => Priority::Medium,
            "HIGH" => Priority::High,
            "URGENT" => Priority::Urgent,
            _ => Priority::Unrecognized(s.to_string()),
        })
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Used to support serde
impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Priority, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let priority = s.parse::<Priority>().unwrap_or_else(|never| match never {});
        if let Priority::Unrecognized(other) = &priority {
            log::warn!("Unrecognized task priority {:?}", other);
        }
        Ok(priority)
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The task ID, assigned by the store
    id: TaskId,

    /// The display name of the task
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// When this task is due, in local time
    #[serde(default)]
    due_date: Timestamp,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Priority,

    /// The time this task was created.
    /// This is assigned by the store and only used for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<Timestamp>,
}


impl Task {
    /// Create a new Task instance, as the store would send it
    pub fn new<I: Into<TaskId>, S: ToString>(id: I, title: S, due_date: Timestamp, completed: bool, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            description: None,
            due_date,
            completed,
            priority,
            created_at: None,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(&self) -> &TaskId     { &self.id          }
    pub fn title(&self) -> &str     { &self.title       }
    pub fn completed(&self) -> bool { self.completed    }
    pub fn priority(&self) -> &Priority           { &self.priority }
    pub fn due_date(&self) -> &Timestamp          { &self.due_date }
    pub fn description(&self) -> Option<&str>     { self.description.as_deref() }
    pub fn created_at(&self) -> Option<&Timestamp> { self.created_at.as_ref() }

    /// The local due date and time, if it is valid
    pub fn due(&self) -> Option<NaiveDateTime> {
        self.due_date.local()
    }

    /// The local calendar day this task is due, if its due date is valid
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.date()
    }

    /// Returns a copy with the completion flipped, like the store does on a toggle
    pub fn toggled(&self) -> Self {
        let mut copy = self.clone();
        copy.completed = !copy.completed;
        copy
    }
}
