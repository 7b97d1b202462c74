//! Classification of tasks by temporal status
//!
//! Every view (dashboard counters, list badges, calendar dots, filters...) derives the status of a
//! task from the functions of this module, relative to an explicit reference instant `now`.
//! `now` is a local wall-clock time, just like task due dates.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csscolorparser::Color;

use crate::config::{Palette, DEFAULT_HORIZON_DAYS};
use crate::task::Task;

/// The default "upcoming" horizon
pub fn default_horizon() -> Duration {
    Duration::days(DEFAULT_HORIZON_DAYS)
}

/// Whether a task is late.
///
/// Completed tasks and tasks with an invalid due date are never overdue.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    if task.completed() {
        return false;
    }
    match task.due() {
        Some(due) => due < now,
        None => false,
    }
}

/// Whether a task is due before `now + horizon` (inclusive).
///
/// There is no lower bound: an overdue task is upcoming as well.
pub fn is_upcoming(task: &Task, now: NaiveDateTime, horizon: Duration) -> bool {
    if task.completed() {
        return false;
    }
    match task.due() {
        Some(due) => match now.checked_add_signed(horizon) {
            Some(limit) => due <= limit,
            // The limit is out of the representable range
            None => horizon > Duration::zero(),
        },
        None => false,
    }
}


/// The displayed status of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Completed,
    Overdue,
    Pending,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Pending => "Pending",
        }
    }

    pub fn color(&self, palette: &Palette) -> Color {
        match self {
            TaskStatus::Completed => palette.completed.clone(),
            TaskStatus::Overdue => palette.overdue.clone(),
            TaskStatus::Pending => palette.pending.clone(),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.label())
    }
}

/// Completion wins over lateness, anything else is pending
pub fn status(task: &Task, now: NaiveDateTime) -> TaskStatus {
    if task.completed() {
        TaskStatus::Completed
    } else if is_overdue(task, now) {
        TaskStatus::Overdue
    } else {
        TaskStatus::Pending
    }
}

pub fn status_color(task: &Task, now: NaiveDateTime, palette: &Palette) -> Color {
    status(task, now).color(palette)
}


/// Tasks grouped by the local calendar day they are due
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayBuckets<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Task>>,
    invalid: Vec<&'a Task>,
}

impl<'a> DayBuckets<'a> {
    /// The tasks due on `day`, in their original order
    pub fn tasks_on(&self, day: NaiveDate) -> &[&'a Task] {
        self.days.get(&day).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every non-empty day, chronologically
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<&'a Task>)> {
        self.days.iter()
    }

    /// Tasks whose due date cannot be parsed. They belong to no day.
    pub fn invalid(&self) -> &[&'a Task] {
        &self.invalid
    }

    /// The number of tasks that have been put in a day bucket
    pub fn len(&self) -> usize {
        self.days.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Group tasks by the local calendar day of their due date.
///
/// Tasks with an invalid due date are set apart (see [`DayBuckets::invalid`]) and logged.
pub fn group_by_calendar_day<'a, I>(tasks: I) -> DayBuckets<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets = DayBuckets::default();
    for task in tasks {
        match task.due_day() {
            Some(day) => buckets.days.entry(day).or_insert_with(Vec::new).push(task),
            None => {
                log::warn!("Task {} has an invalid due date ({:?}). It will not appear in the calendar", task.id(), task.due_date().raw());
                buckets.invalid.push(task);
            },
        }
    }
    buckets
}

/// The tasks due on a given local calendar day, in their original order
pub fn tasks_on<'a, I>(tasks: I, day: NaiveDate) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter()
        .filter(|task| task.due_day() == Some(day))
        .collect()
}


/// Which tasks a list displays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Pending,
    Completed,
    Overdue,
    Upcoming,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 5] = [TaskFilter::All, TaskFilter::Pending, TaskFilter::Completed, TaskFilter::Overdue, TaskFilter::Upcoming];

    pub fn matches(&self, task: &Task, now: NaiveDateTime, horizon: Duration) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => task.completed() == false,
            TaskFilter::Completed => task.completed(),
            TaskFilter::Overdue => is_overdue(task, now),
            TaskFilter::Upcoming => is_upcoming(task, now, horizon),
        }
    }

    /// Keep the matching tasks, in their original order
    pub fn apply<'a, I>(&self, tasks: I, now: NaiveDateTime, horizon: Duration) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter()
            .filter(|task| self.matches(task, now, horizon))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All tasks",
            TaskFilter::Pending => "Pending",
            TaskFilter::Completed => "Completed",
            TaskFilter::Overdue => "Overdue",
            TaskFilter::Upcoming => "Upcoming",
        }
    }
}

impl Default for TaskFilter {
    fn default() -> Self {
        TaskFilter::All
    }
}

impl FromStr for TaskFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "pending" => Ok(TaskFilter::Pending),
            "completed" => Ok(TaskFilter::Completed),
            "overdue" => Ok(TaskFilter::Overdue),
            "upcoming" => Ok(TaskFilter::Upcoming),
            other => Err(format!("Unknown filter {:?}", other)),
        }
    }
}
