use super::types::{Task, TaskKey, TaskView, TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

fn sort_time(task: &Task) -> NaiveDateTime {
    parse_timestamp(&task.timestamp).unwrap_or_default()
}

/// Display order: open tasks before done ones, each group oldest first.
///
/// Unparsable timestamps sort as the epoch. The backing list is not reordered.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_cached_key(|task| sort_time(task));
    sorted.sort_by_key(|task| task.done);
    sorted
}

pub fn display_list(tasks: &[Task]) -> Vec<TaskView> {
    display_order(tasks).into_iter().map(TaskView::from).collect()
}

pub fn find_task_mut<'a>(tasks: &'a mut [Task], key: &TaskKey) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|task| task.matches(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: &str, done: bool, timestamp: &str) -> Task {
        let mut task = Task::new(description, timestamp);
        task.done = done;
        task
    }

    fn descriptions(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn test_open_tasks_first_then_by_time() {
        let tasks = vec![
            task("A", false, "2024-01-02 00:00:00"),
            task("B", true, "2024-01-01 00:00:00"),
            task("C", false, "2024-01-01 00:00:00"),
        ];

        assert_eq!(descriptions(&display_order(&tasks)), ["C", "A", "B"]);
    }

    #[test]
    fn test_done_tasks_keep_time_order() {
        let tasks = vec![
            task("late", true, "2024-03-01 12:00:00"),
            task("early", true, "2024-01-01 12:00:00"),
            task("open", false, "2025-01-01 00:00:00"),
        ];

        assert_eq!(
            descriptions(&display_order(&tasks)),
            ["open", "early", "late"]
        );
    }

    #[test]
    fn test_unparsable_timestamp_sorts_as_epoch() {
        let tasks = vec![
            task("dated", false, "2024-01-01 00:00:00"),
            task("garbled", false, "not a time"),
        ];

        assert_eq!(descriptions(&display_order(&tasks)), ["garbled", "dated"]);
    }

    #[test]
    fn test_equal_keys_keep_storage_order() {
        let tasks = vec![
            task("first", false, "2024-01-01 00:00:00"),
            task("second", false, "2024-01-01 00:00:00"),
        ];

        assert_eq!(descriptions(&display_order(&tasks)), ["first", "second"]);
    }

    #[test]
    fn test_display_order_leaves_backing_list_alone() {
        let tasks = vec![
            task("b", true, "2024-01-01 00:00:00"),
            task("a", false, "2024-01-02 00:00:00"),
        ];
        let before = tasks.clone();

        let _ = display_list(&tasks);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_display_rows_carry_labels() {
        let tasks = vec![
            task("open", false, "2024-01-01 00:00:00"),
            task("closed", true, "2024-01-01 00:00:00"),
        ];

        let rows = display_list(&tasks);
        assert_eq!(rows[0].added_label, "Added: 2024-01-01 00:00:00");
        assert_eq!(rows[0].action_label, "Complete");
        assert_eq!(rows[1].action_label, "Undo");
        assert_eq!(rows[1].key, TaskKey::new("closed", "2024-01-01 00:00:00"));
    }

    #[test]
    fn test_find_requires_both_fields() {
        let mut tasks = vec![task("same", false, "2024-01-01 00:00:00")];

        assert!(find_task_mut(&mut tasks, &TaskKey::new("same", "2024-01-01 00:00:00")).is_some());
        assert!(find_task_mut(&mut tasks, &TaskKey::new("same", "2024-01-01 00:00:01")).is_none());
        assert!(find_task_mut(&mut tasks, &TaskKey::new("other", "2024-01-01 00:00:00")).is_none());
    }

    #[test]
    fn test_now_timestamp_is_parseable() {
        assert!(parse_timestamp(&now_timestamp()).is_some());
    }
}
