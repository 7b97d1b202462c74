//! Month grids: 42 consecutive days, and the tasks due on each of them

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use csscolorparser::Color;

use crate::bucketing::{self, DayBuckets, TaskStatus};
use crate::calendar::{add_days, start_of_week, MonthCursor, GRID_CELLS, WEEK_LENGTH};
use crate::config::Palette;
use crate::task::Task;

/// Alpha of a cell background, relative to its summary color
const BACKGROUND_ALPHA: f64 = 0x20 as f64 / 255.0;

/// One day of a month grid
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarCell<'a> {
    date: NaiveDate,
    is_current_month: bool,
    tasks: Vec<&'a Task>,
}

/// What a cell displays: one indicator per task, up to a limit, then a count of the others
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellIndicators {
    pub shown: Vec<TaskStatus>,
    pub hidden: usize,
}

/// Background and border colors of a cell that has tasks
#[derive(Clone, Debug, PartialEq)]
pub struct CellStyle {
    pub background: Color,
    pub border: Color,
}

impl<'a> CalendarCell<'a> {
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn is_current_month(&self) -> bool { self.is_current_month }
    /// Every task due this day, in their original order
    pub fn tasks(&self) -> &[&'a Task] { &self.tasks }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// The status that sums up this day, or `None` if there is no task this day.
    ///
    /// Tasks are scanned in order: the first overdue task wins and stops the scan, a completed task
    /// turns the day "completed", otherwise it stays "pending".
    /// So a day that mixes completed and pending tasks is "completed" as a whole.
    pub fn summary_status(&self, now: NaiveDateTime) -> Option<TaskStatus> {
        if self.tasks.is_empty() {
            return None;
        }

        let mut summary = TaskStatus::Pending;
        for task in &self.tasks {
            if task.completed() {
                summary = TaskStatus::Completed;
            } else if bucketing::is_overdue(task, now) {
                summary = TaskStatus::Overdue;
                break;
            }
        }
        Some(summary)
    }

    pub fn style(&self, now: NaiveDateTime, palette: &Palette) -> Option<CellStyle> {
        self.summary_status(now).map(|status| {
            let border = status.color(palette);
            let mut background = border.clone();
            background.a = BACKGROUND_ALPHA;
            CellStyle { background, border }
        })
    }

    /// The statuses of the first `max` tasks, and how many tasks are left out
    pub fn indicators(&self, now: NaiveDateTime, max: usize) -> CellIndicators {
        let shown: Vec<TaskStatus> = self.tasks.iter()
            .take(max)
            .map(|task| bucketing::status(task, now))
            .collect();
        let hidden = self.tasks.len() - shown.len();
        CellIndicators { shown, hidden }
    }
}


/// A month laid out as 6 weeks.
///
/// This is rebuilt from scratch whenever the tasks or the displayed month change. It borrows the tasks.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid<'a> {
    month: MonthCursor,
    week_start: Weekday,
    cells: Vec<CalendarCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Build the grid of the month that contains `reference`.
    ///
    /// The first cell is the `week_start` day on or before the 1st of the month, and every day of the
    /// grid (including days of the adjacent months) gets the tasks due that day.
    pub fn build(reference: NaiveDate, buckets: &DayBuckets<'a>, week_start: Weekday) -> Self {
        let month = MonthCursor::containing(reference);
        let grid_start = start_of_week(month.first_day(), week_start);

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = add_days(grid_start, offset);
                CalendarCell {
                    date,
                    is_current_month: month.contains(date),
                    tasks: buckets.tasks_on(date).to_vec(),
                }
            })
            .collect();

        Self { month, week_start, cells }
    }

    /// Same as [`Self::build`], grouping `tasks` first
    pub fn from_tasks<I>(reference: NaiveDate, tasks: I, week_start: Weekday) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let buckets = bucketing::group_by_calendar_day(tasks);
        Self::build(reference, &buckets, week_start)
    }

    pub fn month(&self) -> MonthCursor { self.month }
    pub fn week_start(&self) -> Weekday { self.week_start }
    pub fn cells(&self) -> &[CalendarCell<'a>] { &self.cells }

    /// The grid rows
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell<'a>> {
        self.cells.chunks(WEEK_LENGTH)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.cells.first().map(|c| c.date).unwrap_or_else(|| self.month.first_day())
    }

    pub fn last_date(&self) -> NaiveDate {
        self.cells.last().map(|c| c.date).unwrap_or_else(|| self.month.last_day())
    }

    /// The cell of a given date, if it is in the grid
    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell<'a>> {
        let offset = date.signed_duration_since(self.first_date()).num_days();
        if offset < 0 {
            return None;
        }
        self.cells.get(offset as usize)
    }

    /// How many tasks the grid displays, across all its days
    pub fn task_count(&self) -> usize {
        self.cells.iter().map(|c| c.tasks.len()).sum()
    }

    /// Whether this grid shows the month `date` belongs to
    pub fn shows_month_of(&self, date: NaiveDate) -> bool {
        self.month.contains(date)
    }
}
