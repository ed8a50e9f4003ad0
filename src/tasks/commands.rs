use super::helpers::find_task_mut;
use super::types::{Task, TaskKey};
use super::TaskError;

/// Appends a new open task stamped with `now`. The description is trimmed first.
pub fn add_task<'a>(
    tasks: &'a mut Vec<Task>,
    description: &str,
    now: &str,
) -> Result<&'a Task, TaskError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription);
    }

    tasks.push(Task::new(description, now));
    Ok(&tasks[tasks.len() - 1])
}

/// Flips `done` on the first task matching `key`. Returns the new value.
pub fn toggle_task(tasks: &mut [Task], key: &TaskKey) -> Result<bool, TaskError> {
    let task = find_task_mut(tasks, key).ok_or_else(|| TaskError::not_found(key))?;
    task.done = !task.done;
    Ok(task.done)
}

/// Removes every task matching `key`. Returns how many were removed.
pub fn remove_task(tasks: &mut Vec<Task>, key: &TaskKey) -> Result<usize, TaskError> {
    let initial_len = tasks.len();
    tasks.retain(|task| !task.matches(key));

    match initial_len - tasks.len() {
        0 => Err(TaskError::not_found(key)),
        removed => Ok(removed),
    }
}
