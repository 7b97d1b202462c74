//! Month calendars
//!
//! A [`MonthCursor`] tells which month is displayed, and [`grid::MonthGrid`] lays this month out as
//! 6 weeks of 7 days.

pub mod grid;
pub use grid::{CalendarCell, CellIndicators, MonthGrid};

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of days in a month grid (6 weeks)
pub const GRID_CELLS: usize = 42;
/// Number of days in a week
pub const WEEK_LENGTH: usize = 7;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];


/// The month a calendar displays.
///
/// This deliberately has no day component, so that navigating from e.g. January 31st lands on February.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    /// 1-based
    month: u32,
}

impl MonthCursor {
    /// Returns `None` if `month` is not in `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month that contains `date` (e.g. today)
    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    /// Move by `months` (that can be negative)
    pub fn shifted(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        first_day_of_month(self.year, self.month)
    }

    pub fn last_day(&self) -> NaiveDate {
        add_days(self.next().first_day(), -1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} {}", self.name(), self.year)
    }
}


fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or(NaiveDate::MIN)
}

pub(crate) fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(date)
}

/// The closest `week_start` day on or before `day`
pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let day_idx = day.weekday().num_days_from_monday() as i64;
    let start_idx = week_start.num_days_from_monday() as i64;
    let diff = (7 + day_idx - start_idx) % 7;
    add_days(day, -diff)
}

/// Short weekday names, starting from `week_start`
pub fn weekday_labels(week_start: Weekday) -> Vec<&'static str> {
    let mut labels = Vec::with_capacity(WEEK_LENGTH);
    let mut day = week_start;
    for _ in 0..WEEK_LENGTH {
        labels.push(weekday_label(day));
        day = day.succ();
    }
    labels
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn navigation_wraps_years() {
        let dec = MonthCursor::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthCursor::new(2024, 1).unwrap());
        assert_eq!(dec.next().previous(), dec);
        assert_eq!(MonthCursor::new(2024, 1).unwrap().previous(), dec);
        assert_eq!(dec.shifted(-24), MonthCursor::new(2021, 12).unwrap());
        assert_eq!(dec.shifted(14), MonthCursor::new(2025, 2).unwrap());
        assert!(MonthCursor::new(2024, 13).is_none());
        assert!(MonthCursor::new(2024, 0).is_none());
    }

    #[test]
    fn navigating_from_the_31st_does_not_skip_a_month() {
        let cursor = MonthCursor::containing(ymd(2024, 1, 31));
        assert_eq!(cursor.next(), MonthCursor::new(2024, 2).unwrap());
    }

    #[test]
    fn month_bounds() {
        let feb = MonthCursor::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), ymd(2024, 2, 1));
        assert_eq!(feb.last_day(), ymd(2024, 2, 29));
        assert_eq!(MonthCursor::new(2023, 2).unwrap().last_day(), ymd(2023, 2, 28));
        assert_eq!(MonthCursor::new(2023, 12).unwrap().last_day(), ymd(2023, 12, 31));
        assert!(feb.contains(ymd(2024, 2, 29)));
        assert!(feb.contains(ymd(2024, 3, 1)) == false);
        assert_eq!(feb.to_string(), "February 2024");
    }

    #[test]
    fn week_starts() {
        // Feb 1st, 2024 is a Thursday
        assert_eq!(start_of_week(ymd(2024, 2, 1), Weekday::Sun), ymd(2024, 1, 28));
        assert_eq!(start_of_week(ymd(2024, 2, 1), Weekday::Mon), ymd(2024, 1, 29));
        // a Sunday is its own week start
        assert_eq!(start_of_week(ymd(2024, 9, 1), Weekday::Sun), ymd(2024, 9, 1));
    }

    #[test]
    fn labels() {
        assert_eq!(weekday_labels(Weekday::Sun), vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        assert_eq!(weekday_labels(Weekday::Mon)[6], "Sun");
    }
}
