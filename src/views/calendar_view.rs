//! The month calendar

use std::fmt::Write;

use chrono::{Datelike, NaiveDateTime};

use crate::bucketing::TaskStatus;
use crate::calendar::{weekday_labels, CalendarCell, CellIndicators, MonthGrid};
use crate::config::ViewSettings;

/// Width of a rendered cell, in characters
const CELL_WIDTH: usize = 8;

/// A grid cell, with everything needed to draw it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    /// Hex colors of the background and the border, for days that have tasks
    pub background: Option<String>,
    pub border: Option<String>,
    pub indicators: CellIndicators,
}

impl CellView {
    pub fn new(cell: &CalendarCell<'_>, now: NaiveDateTime, settings: &ViewSettings) -> Self {
        let style = cell.style(now, &settings.palette);
        Self {
            day: cell.date().day(),
            is_current_month: cell.is_current_month(),
            is_today: cell.is_today(now.date()),
            background: style.as_ref().map(|s| super::hex(&s.background)),
            border: style.as_ref().map(|s| super::hex(&s.border)),
            indicators: cell.indicators(now, settings.max_indicators),
        }
    }

    fn day_label(&self) -> String {
        let today = if self.is_today { "*" } else { "" };
        if self.is_current_month {
            format!("{:>2}{}", self.day, today)
        } else {
            format!("({}){}", self.day, today)
        }
    }

    fn indicator_label(&self) -> String {
        let mut label: String = self.indicators.shown.iter().map(|s| symbol(*s)).collect();
        if self.indicators.hidden > 0 {
            label.push_str(&format!("+{}", self.indicators.hidden));
        }
        label
    }
}

fn symbol(status: TaskStatus) -> char {
    match status {
        TaskStatus::Completed => 'v',
        TaskStatus::Overdue => '!',
        TaskStatus::Pending => 'o',
    }
}

pub fn cell_views(grid: &MonthGrid<'_>, now: NaiveDateTime, settings: &ViewSettings) -> Vec<CellView> {
    grid.cells().iter()
        .map(|cell| CellView::new(cell, now, settings))
        .collect()
}

/// Lay out the grid as text: each week is a line of day numbers, followed by a line of task indicators
pub fn render(grid: &MonthGrid<'_>, now: NaiveDateTime, settings: &ViewSettings) -> String {
    let mut out = format!("{}\n", grid.month());
    for label in weekday_labels(grid.week_start()) {
        let _ = write!(out, "{:<width$}", label, width = CELL_WIDTH);
    }
    let _ = writeln!(out);

    let views = cell_views(grid, now, settings);
    for week in views.chunks(crate::calendar::WEEK_LENGTH) {
        let days: String = week.iter()
            .map(|v| format!("{:<width$}", v.day_label(), width = CELL_WIDTH))
            .collect();
        let indicators: String = week.iter()
            .map(|v| format!("{:<width$}", v.indicator_label(), width = CELL_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", days.trim_end());
        let _ = writeln!(out, "{}", indicators.trim_end());
    }
    let _ = writeln!(out, "Legend: v completed  ! overdue  o pending  * today  (n) other month");
    out
}
