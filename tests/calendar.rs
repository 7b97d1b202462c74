//! Classification and month grids over a realistic task list

mod scenarii;

use chrono::{NaiveDate, Weekday};

use taskgrid::bucketing::{self, TaskFilter, TaskStatus};
use taskgrid::calendar::GRID_CELLS;
use taskgrid::config::ViewSettings;
use taskgrid::views::{self, DateModal, TaskStats};
use taskgrid::{MonthGrid, Priority, TaskId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn wire_format() {
    let _ = env_logger::builder().is_test(true).try_init();

    let tasks = scenarii::february_tasks();
    assert_eq!(tasks.len(), 9);
    assert_eq!(tasks[0].id(), &TaskId::Number(1));
    assert_eq!(tasks[0].description(), Some("Before noon"));
    assert_eq!(tasks[1].description(), None);
    assert_eq!(tasks[5].due_date().is_valid(), false);
    assert_eq!(tasks[5].due_date().raw(), "not a date");
    assert_eq!(tasks[6].priority(), &Priority::Unrecognized("CRITICAL".to_string()));
    // Null and missing due dates are kept as invalid ones
    assert_eq!(tasks[7].due_date().is_valid(), false);
    assert_eq!(tasks[8].due_date().is_valid(), false);
    assert_eq!(tasks[8].priority(), &Priority::Medium);

    // Unknown values are sent back as they were received
    let json = serde_json::to_value(&tasks[6]).unwrap();
    assert_eq!(json["priority"], "CRITICAL");
    assert_eq!(json["dueDate"], "2024-02-29T23:59:00");
}

#[test]
fn buckets_and_filters() {
    let _ = env_logger::builder().is_test(true).try_init();

    let tasks = scenarii::february_tasks();
    let now = scenarii::now();
    let horizon = bucketing::default_horizon();

    let buckets = bucketing::group_by_calendar_day(&tasks);
    assert_eq!(buckets.len(), 6);
    assert_eq!(buckets.days().count(), 5);
    assert_eq!(scenarii::titles(buckets.tasks_on(date(2024, 2, 10))), vec!["Pay rent", "Dentist"]);
    assert_eq!(scenarii::titles(buckets.invalid()), vec!["Someday", "No date", "Missing date"]);

    let overdue = TaskFilter::Overdue.apply(&tasks, now, horizon);
    assert_eq!(scenarii::titles(&overdue), vec!["Pay rent"]);

    let upcoming = TaskFilter::Upcoming.apply(&tasks, now, horizon);
    assert_eq!(scenarii::titles(&upcoming), vec!["Pay rent", "Team lunch"]);

    let pending = TaskFilter::Pending.apply(&tasks, now, horizon);
    assert_eq!(pending.len(), 7);

    let stats = TaskStats::compute(&tasks, now, horizon);
    assert_eq!(stats.total, 9);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.pending, 7);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.upcoming, 2);
}

#[test]
fn february_grid() {
    let tasks = scenarii::february_tasks();
    let now = scenarii::now();
    let grid = MonthGrid::from_tasks(date(2024, 2, 14), &tasks, Weekday::Sun);

    assert_eq!(grid.cells().len(), GRID_CELLS);
    assert_eq!(grid.first_date(), date(2024, 1, 28));
    assert_eq!(grid.last_date(), date(2024, 3, 9));

    // Adjacent months show their tasks too
    let jan_28 = grid.cell(date(2024, 1, 28)).unwrap();
    assert_eq!(jan_28.is_current_month(), false);
    assert_eq!(jan_28.summary_status(now), Some(TaskStatus::Completed));
    let mar_2 = grid.cell(date(2024, 3, 2)).unwrap();
    assert_eq!(mar_2.tasks().len(), 1);

    let feb_10 = grid.cell(date(2024, 2, 10)).unwrap();
    assert_eq!(feb_10.summary_status(now), Some(TaskStatus::Overdue));

    let feb_29 = grid.cell(date(2024, 2, 29)).unwrap();
    assert!(feb_29.is_current_month());
    assert_eq!(feb_29.summary_status(now), Some(TaskStatus::Pending));

    // Every valid task of the displayed range is in the grid, the invalid ones are not
    assert_eq!(grid.task_count(), 6);
}

#[test]
fn monday_grid_and_text() {
    let tasks = scenarii::february_tasks();
    let now = scenarii::now();
    let settings = ViewSettings { week_start: Weekday::Mon, ..ViewSettings::default() };
    let grid = MonthGrid::from_tasks(date(2024, 9, 1), &tasks, settings.week_start);
    assert_eq!(grid.first_date(), date(2024, 8, 26));
    assert_eq!(grid.task_count(), 0);

    let text = views::calendar_view::render(&grid, now, &settings);
    assert!(text.starts_with("September 2024\nMon"));
}

#[test]
fn day_modal() {
    let tasks = scenarii::february_tasks();
    let modal = DateModal::open(date(2024, 2, 29), &tasks);
    let text = modal.render(scenarii::now());
    // No label for an unrecognized priority
    assert!(text.contains("23:59 Legacy [Pending]\n"));
}
