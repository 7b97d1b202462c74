//! The tasks of a single day, as shown when a calendar cell is picked

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};

use crate::bucketing::{self, TaskStatus};
use crate::form::TaskDraft;
use crate::task::Task;

#[derive(Clone, Debug, PartialEq)]
pub struct DateModal<'a> {
    date: NaiveDate,
    tasks: Vec<&'a Task>,
}

impl<'a> DateModal<'a> {
    pub fn open<I>(date: NaiveDate, tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        Self { date, tasks: bucketing::tasks_on(tasks, date) }
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn tasks(&self) -> &[&'a Task] { &self.tasks }
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }

    /// E.g. `Saturday, February 10, 2024`
    pub fn title(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    /// A form to create a task on this day
    pub fn new_task_draft(&self) -> TaskDraft {
        TaskDraft::for_date(self.date)
    }

    pub fn render(&self, now: NaiveDateTime) -> String {
        let mut out = format!("{}\n", self.title());
        if self.is_empty() {
            let _ = writeln!(out, "No tasks for this date.");
            let _ = writeln!(out, "A new task can be created on {}.", self.date.format("%Y-%m-%d"));
            return out;
        }

        for task in &self.tasks {
            let status = bucketing::status(task, now);
            let time = task.due().map(|d| d.format("%H:%M").to_string()).unwrap_or_default();
            let _ = write!(out, "  {} {} [{}]", time, task.title(), status.label());
            // Unrecognized priorities are not displayed
            if let Some(label) = task.priority().label() {
                let _ = write!(out, " ({})", label);
            }
            let _ = writeln!(out);
            if let Some(description) = task.description() {
                let _ = writeln!(out, "        {}", description);
            }
        }
        out
    }

    /// How many tasks of this day have a given status
    pub fn count(&self, status: TaskStatus, now: NaiveDateTime) -> usize {
        self.tasks.iter()
            .filter(|t| bucketing::status(t, now) == status)
            .count()
    }
}
