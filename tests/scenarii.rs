//! Task lists that are shared by several integration tests
//!
//! They are written the way the REST API sends them, so that they also check the wire format.

#![allow(dead_code)]

use chrono::NaiveDateTime;

use taskgrid::Task;
use taskgrid::Timestamp;

/// The reference instant used by the scenarii
pub fn now() -> NaiveDateTime {
    Timestamp::parse("2024-02-15T00:00:00").local().unwrap()
}

/// A few tasks around February 2024
pub const FEBRUARY_TASKS: &str = r#"[
    { "id": 1, "title": "Pay rent", "description": "Before noon", "dueDate": "2024-02-10T09:00:00", "completed": false, "priority": "HIGH", "createdAt": "2024-02-01T08:30:00" },
    { "id": 2, "title": "Dentist", "description": null, "dueDate": "2024-02-10T14:00:00", "completed": true, "priority": "MEDIUM", "createdAt": "2024-02-01T08:31:00" },
    { "id": 3, "title": "Team lunch", "dueDate": "2024-02-20T12:00:00", "completed": false, "priority": "LOW" },
    { "id": 4, "title": "Taxes", "dueDate": "2024-03-02T10:00:00", "completed": false, "priority": "URGENT" },
    { "id": 5, "title": "Old note", "dueDate": "2024-01-28T18:00:00", "completed": true, "priority": "LOW" },
    { "id": 6, "title": "Someday", "dueDate": "not a date", "completed": false, "priority": "MEDIUM" },
    { "id": 7, "title": "Legacy", "dueDate": "2024-02-29T23:59:00", "completed": false, "priority": "CRITICAL" },
    { "id": 8, "title": "No date", "dueDate": null, "completed": false, "priority": "LOW" },
    { "id": 9, "title": "Missing date", "completed": false }
]"#;

pub fn february_tasks() -> Vec<Task> {
    serde_json::from_str(FEBRUARY_TASKS).unwrap()
}

pub fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.title().to_string()).collect()
}
