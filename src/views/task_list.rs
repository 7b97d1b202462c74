//! The filtered task list

use std::fmt::Write;

use chrono::{Duration, NaiveDateTime};
use csscolorparser::Color;

use crate::bucketing::{self, TaskFilter};
use crate::task::Task;
use crate::views::{format_created, format_due, format_timestamp, hex};

/// A task, as displayed in the list
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub overdue: bool,
    /// Empty for unrecognized priorities
    pub priority_label: &'static str,
    pub priority_color: Option<Color>,
    pub due: String,
    pub created: Option<String>,
}

impl<'a> TaskRow<'a> {
    pub fn new(task: &'a Task, now: NaiveDateTime) -> Self {
        Self {
            task,
            overdue: bucketing::is_overdue(task, now),
            priority_label: task.priority().label().unwrap_or(""),
            priority_color: task.priority().color(),
            due: format_timestamp(task.due_date(), format_due),
            created: task.created_at().map(|c| format_timestamp(c, format_created)),
        }
    }

    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.task.completed() {
            badges.push("Completed");
        }
        if self.overdue {
            badges.push("Overdue");
        }
        badges
    }
}

/// The rows of the tasks that match `filter`, in their original order
pub fn rows<'a>(tasks: &'a [Task], filter: TaskFilter, now: NaiveDateTime, horizon: Duration) -> Vec<TaskRow<'a>> {
    filter.apply(tasks, now, horizon)
        .into_iter()
        .map(|task| TaskRow::new(task, now))
        .collect()
}

pub fn render(rows: &[TaskRow<'_>], filter: TaskFilter) -> String {
    if rows.is_empty() {
        return format!("{}: no tasks\n", filter.label());
    }

    let mut out = format!("{} ({} task(s))\n", filter.label(), rows.len());
    for row in rows {
        let check = if row.task.completed() { "✓" } else { " " };
        let _ = write!(out, "  [{}] {:<6} {}", check, row.task.id(), row.task.title());
        for badge in row.badges() {
            let _ = write!(out, " [{}]", badge);
        }
        // Unrecognized priorities have neither a label nor a color
        if let Some(color) = &row.priority_color {
            let _ = write!(out, " ({} {})", row.priority_label, hex(color));
        }
        let _ = writeln!(out);

        if let Some(description) = row.task.description() {
            let _ = writeln!(out, "         {}", description);
        }
        let _ = write!(out, "         Due: {}", row.due);
        if let Some(created) = &row.created {
            let _ = write!(out, "  Created: {}", created);
        }
        let _ = writeln!(out);
    }
    out
}
