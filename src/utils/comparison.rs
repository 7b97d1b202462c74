//! Utilities to compare tasks
//!
//! These can be used to sort task lists, e.g. with `sort_by`

use std::cmp::Ordering;

use crate::task::Task;

/// Earliest due date first. Tasks with an invalid due date come last.
pub fn compare_by_due(left: &Task, right: &Task) -> Ordering {
    match (left.due(), right.due()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive alphabetical order of the titles
pub fn compare_by_title(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.title().to_lowercase(), &right.title().to_lowercase())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::timestamp::Timestamp;

    #[test]
    fn sort_by_due() {
        let mut tasks = vec![
            Task::new(1, "b", Timestamp::parse("never"), false, Priority::Low),
            Task::new(2, "A", Timestamp::parse("2024-02-11T09:00"), false, Priority::Low),
            Task::new(3, "c", Timestamp::parse("2024-02-10T09:00"), false, Priority::Low),
        ];
        tasks.sort_by(compare_by_due);
        let ids: Vec<String> = tasks.iter().map(|t| t.id().to_string()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        tasks.sort_by(compare_by_title);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["A", "b", "c"]);
    }
}
