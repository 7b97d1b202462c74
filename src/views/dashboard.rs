//! Counters over the whole task list, and the alerts they trigger

use std::fmt::Write;

use chrono::{Duration, NaiveDateTime};
use csscolorparser::Color;

use crate::bucketing;
use crate::config::Palette;
use crate::task::Task;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Every task that is not completed, overdue ones included
    pub pending: usize,
    pub overdue: usize,
    /// Not completed, and due before the end of the horizon (overdue ones included)
    pub upcoming: usize,
}

impl TaskStats {
    pub fn compute<'a, I>(tasks: I, now: NaiveDateTime, horizon: Duration) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut stats = Self::default();
        for task in tasks {
            stats.total += 1;
            if task.completed() {
                stats.completed += 1;
            }
            if bucketing::is_overdue(task, now) {
                stats.overdue += 1;
            }
            if bucketing::is_upcoming(task, now, horizon) {
                stats.upcoming += 1;
            }
        }
        stats.pending = stats.total - stats.completed;
        stats
    }

    /// The counters, with their titles and colors, in display order
    pub fn cards(&self, palette: &Palette) -> Vec<(&'static str, usize, Color)> {
        vec![
            ("Total", self.total, palette.total.clone()),
            ("Completed", self.completed, palette.completed.clone()),
            ("Pending", self.pending, palette.pending.clone()),
            ("Overdue", self.overdue, palette.overdue.clone()),
            ("Upcoming", self.upcoming, palette.upcoming.clone()),
        ]
    }

    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if self.overdue > 0 {
            alerts.push(Alert {
                kind: AlertKind::Warning,
                message: format!("You have {} overdue task(s) that need your attention.", self.overdue),
            });
        }
        if self.upcoming > 0 {
            alerts.push(Alert {
                kind: AlertKind::Info,
                message: format!("You have {} task(s) scheduled for this week.", self.upcoming),
            });
        }
        if self.total == 0 {
            alerts.push(Alert {
                kind: AlertKind::Info,
                message: "Welcome! Start by creating your first task.".to_string(),
            });
        }
        alerts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

pub fn render(stats: &TaskStats, palette: &Palette) -> String {
    let mut out = String::from("Dashboard\n");
    for (title, value, color) in stats.cards(palette) {
        let _ = writeln!(out, "  {:<10} {:>4}  {}", title, value, super::hex(&color));
    }
    for alert in stats.alerts() {
        let prefix = match alert.kind {
            AlertKind::Warning => "Warning",
            AlertKind::Info => "Note",
        };
        let _ = writeln!(out, "{}: {}", prefix, alert.message);
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::timestamp::Timestamp;

    fn now() -> NaiveDateTime {
        Timestamp::parse("2024-02-15T00:00").local().unwrap()
    }

    fn task(id: i64, due: &str, completed: bool) -> Task {
        Task::new(id, format!("task {}", id), Timestamp::parse(due), completed, Priority::Medium)
    }

    #[test]
    fn counters() {
        let tasks = vec![
            task(1, "2024-02-10T09:00", false), // overdue
            task(2, "2024-02-10T09:00", true),  // completed
            task(3, "2024-02-20T09:00", false), // upcoming
            task(4, "2024-03-20T09:00", false), // later
            task(5, "garbage", false),          // invalid
        ];
        let stats = TaskStats::compute(&tasks, now(), bucketing::default_horizon());
        assert_eq!(stats, TaskStats { total: 5, completed: 1, pending: 4, overdue: 1, upcoming: 2 });

        let alerts = stats.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert!(alerts[0].message.contains("1 overdue"));
        assert!(alerts[1].message.contains("2 task(s)"));
    }

    #[test]
    fn empty_list() {
        let stats = TaskStats::compute(&Vec::<Task>::new(), now(), bucketing::default_horizon());
        assert_eq!(stats, TaskStats::default());
        let alerts = stats.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].message.starts_with("Welcome"));

        let text = render(&stats, &Palette::default());
        assert!(text.contains("#667eea"));
        assert!(text.contains("Note: Welcome"));
    }
}
