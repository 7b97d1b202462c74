//! Task creation and edition forms

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::{Priority, Task};
use crate::timestamp::Timestamp;

/// The due time a new form starts with
pub const DEFAULT_DUE_TIME: &str = "12:00";

/// The payload sent to the store to create or update a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Timestamp,
    pub priority: Priority,
}


/// The content of a task form, as typed by the user.
///
/// Nothing is checked until [`TaskDraft::validate`] is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    /// `HH:MM`
    pub due_time: String,
    pub priority: Priority,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            due_time: DEFAULT_DUE_TIME.to_string(),
            priority: Priority::default(),
        }
    }
}

impl TaskDraft {
    /// An empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty form, due on a given day (e.g. the day picked in the calendar)
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            due_date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// A form pre-filled to edit an existing task.
    ///
    /// The date and time are the local ones. A task with an invalid due date gets an empty date, so
    /// that the user has to pick a new one.
    pub fn from_task(task: &Task) -> Self {
        let (due_date, due_time) = match task.due() {
            Some(due) => (due.format("%Y-%m-%d").to_string(), due.format("%H:%M").to_string()),
            None => (String::new(), DEFAULT_DUE_TIME.to_string()),
        };
        Self {
            title: task.title().to_string(),
            description: task.description().unwrap_or_default().to_string(),
            due_date,
            due_time,
            priority: task.priority().clone(),
        }
    }

    /// Check the form, and build the payload for the store
    pub fn validate(&self) -> Result<NewTask, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let raw_date = self.due_date.trim();
        if raw_date.is_empty() {
            return Err(ValidationError::MissingDueDate);
        }
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDueDate(raw_date.to_string()))?;

        let raw_time = match self.due_time.trim() {
            "" => DEFAULT_DUE_TIME,
            t => t,
        };
        let time = NaiveTime::parse_from_str(raw_time, "%H:%M")
            .map_err(|_| ValidationError::InvalidDueTime(raw_time.to_string()))?;

        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: Timestamp::from_local(date.and_time(time)),
            priority: self.priority.clone(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TaskDraft {
        TaskDraft {
            title: "Dentist".to_string(),
            description: "Bring the card".to_string(),
            due_date: "2024-02-10".to_string(),
            due_time: "09:30".to_string(),
            priority: Priority::High,
        }
    }

    #[test]
    fn valid_form() {
        let new_task = filled().validate().unwrap();
        assert_eq!(new_task.due_date.raw(), "2024-02-10T09:30:00");

        let json = serde_json::to_value(&new_task).unwrap();
        assert_eq!(json["title"], "Dentist");
        assert_eq!(json["dueDate"], "2024-02-10T09:30:00");
        assert_eq!(json["priority"], "HIGH");
    }

    #[test]
    fn defaults() {
        let draft = TaskDraft::for_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(draft.due_date, "2024-02-29");
        assert_eq!(draft.due_time, "12:00");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn required_fields() {
        let mut draft = filled();
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::MissingTitle));

        let mut draft = filled();
        draft.due_date = String::new();
        assert_eq!(draft.validate(), Err(ValidationError::MissingDueDate));
    }

    #[test]
    fn malformed_fields() {
        let mut draft = filled();
        draft.due_date = "2024-02-30".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::InvalidDueDate("2024-02-30".to_string())));

        let mut draft = filled();
        draft.due_time = "25:00".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::InvalidDueTime("25:00".to_string())));

        let mut draft = filled();
        draft.due_time = String::new();
        assert_eq!(draft.validate().unwrap().due_date.raw(), "2024-02-10T12:00:00");
    }

    #[test]
    fn edit_form_uses_local_date_and_time() {
        let task = Task::new(3, "Standup", Timestamp::parse("2024-02-10T23:45:00"), false, Priority::Low)
            .with_description("daily");
        let draft = TaskDraft::from_task(&task);
        assert_eq!(draft.due_date, "2024-02-10");
        assert_eq!(draft.due_time, "23:45");
        assert_eq!(draft.description, "daily");
        assert_eq!(draft.validate().unwrap().due_date, *task.due_date());
    }
}
