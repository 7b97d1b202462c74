//! Text renditions of the task views
//!
//! Each view is built from a task slice and an explicit `now`, and returns plain data that can be
//! inspected, plus a `render` function that lays it out as text.

use chrono::NaiveDateTime;
use csscolorparser::Color;

use crate::timestamp::Timestamp;

pub mod dashboard;
pub use dashboard::{Alert, AlertKind, TaskStats};
pub mod task_list;
pub use task_list::TaskRow;
pub mod calendar_view;
pub use calendar_view::CellView;
pub mod date_modal;
pub use date_modal::DateModal;

/// E.g. `Sat, Feb 10, 2024 - 09:00`
pub fn format_due(datetime: NaiveDateTime) -> String {
    datetime.format("%a, %b %-d, %Y - %H:%M").to_string()
}

/// E.g. `Feb 10, 2024, 09:00`
pub fn format_created(datetime: NaiveDateTime) -> String {
    datetime.format("%b %-d, %Y, %H:%M").to_string()
}

/// Format a timestamp, or display it as it was received when it cannot be parsed
pub fn format_timestamp(timestamp: &Timestamp, format: fn(NaiveDateTime) -> String) -> String {
    match timestamp.local() {
        Some(datetime) => format(datetime),
        None => timestamp.raw().to_string(),
    }
}

/// `#rrggbb`, or `#rrggbbaa` for translucent colors
pub fn hex(color: &Color) -> String {
    color.to_hex_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        let t = Timestamp::parse("2024-02-10T09:00:00");
        assert_eq!(format_timestamp(&t, format_due), "Sat, Feb 10, 2024 - 09:00");
        assert_eq!(format_timestamp(&t, format_created), "Feb 10, 2024, 09:00");

        let invalid = Timestamp::parse("someday");
        assert_eq!(format_timestamp(&invalid, format_due), "someday");

        assert_eq!(hex(&crate::config::rgb(0x10, 0xb9, 0x81)), "#10b981");
    }
}
