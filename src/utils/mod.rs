///! Some utility functions

use crate::task::Task;

pub mod comparison;

/// A debug utility that pretty-prints a task
pub fn print_task(task: &Task) {
    println!("    {}", task_line(task));
}

/// A debug utility that pretty-prints a list of tasks
pub fn print_task_list(tasks: &[Task]) {
    for task in tasks {
        print_task(task);
    }
}

fn task_line(task: &Task) -> String {
    let completion = if task.completed() { "✓" } else { " " };
    let validity = if task.due_date().is_valid() { " " } else { "?" };
    format!("{}{} {}\t{}\t{}\t{}", completion, validity, task.title(), task.due_date(), task.priority(), task.id())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use crate::timestamp::Timestamp;

    #[test]
    fn lines() {
        let done = Task::new(7, "Laundry", Timestamp::parse("2024-02-10T09:00"), true, Priority::Low);
        assert_eq!(task_line(&done), "✓  Laundry\t2024-02-10T09:00\tLOW\t7");

        let broken = Task::new(8, "Broken", Timestamp::parse("tomorrow"), false, Priority::Urgent);
        assert_eq!(task_line(&broken), " ? Broken\ttomorrow\tURGENT\t8");
    }
}
