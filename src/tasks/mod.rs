pub mod commands;
pub mod helpers;
pub mod storage;
pub mod types;

use std::path::{Path, PathBuf};
use thiserror::Error;
use types::{Task, TaskKey, TaskView};

/// Rejections from the mutation entry points. The list is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Could not find task: {description} ({timestamp})")]
    NotFound {
        description: String,
        timestamp: String,
    },
}

impl TaskError {
    pub fn not_found(key: &TaskKey) -> Self {
        TaskError::NotFound {
            description: key.description.clone(),
            timestamp: key.timestamp.clone(),
        }
    }
}

/// Owns the task list and the file it is persisted to.
///
/// Every successful mutation is flushed to disk before returning. Failed saves are
/// logged and the in-memory list stays authoritative.
pub struct TasksStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TasksStore {
    /// Loads the list from `path`. Never fails; unreadable files give an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = storage::load_tasks(&path);
        tracing::info!(
            target: "tasks",
            "Tasks store initialized from {:?}: {} tasks",
            path,
            tasks.len()
        );
        Self { path, tasks }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tasks in storage order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn display_list(&self) -> Vec<TaskView> {
        helpers::display_list(&self.tasks)
    }

    pub fn add(&mut self, description: &str) -> Result<Vec<TaskView>, TaskError> {
        let now = helpers::now_timestamp();
        match commands::add_task(&mut self.tasks, description, &now) {
            Ok(task) => {
                tracing::info!(
                    target: "tasks",
                    description = %task.description,
                    timestamp = %task.timestamp,
                    "Task added"
                );
            }
            Err(e) => {
                tracing::warn!(target: "tasks", "{}", e);
                return Err(e);
            }
        }

        self.flush();
        Ok(self.display_list())
    }

    pub fn toggle(&mut self, key: &TaskKey) -> Result<Vec<TaskView>, TaskError> {
        match commands::toggle_task(&mut self.tasks, key) {
            Ok(done) => {
                tracing::info!(
                    target: "tasks",
                    description = %key.description,
                    timestamp = %key.timestamp,
                    done,
                    "Task toggled"
                );
            }
            Err(e) => {
                tracing::warn!(target: "tasks", "Could not toggle: {}", e);
                return Err(e);
            }
        }

        self.flush();
        Ok(self.display_list())
    }

    pub fn remove(&mut self, key: &TaskKey) -> Result<Vec<TaskView>, TaskError> {
        match commands::remove_task(&mut self.tasks, key) {
            Ok(removed) => {
                tracing::info!(
                    target: "tasks",
                    description = %key.description,
                    timestamp = %key.timestamp,
                    removed,
                    "Task removed"
                );
            }
            Err(e) => {
                tracing::warn!(target: "tasks", "Could not remove: {}", e);
                return Err(e);
            }
        }

        self.flush();
        Ok(self.display_list())
    }

    /// Writes the whole list to disk. Returns false if the write failed.
    pub fn flush(&self) -> bool {
        match storage::save_tasks(&self.tasks, &self.path) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    target: "tasks",
                    "Error saving tasks to {:?}: {}",
                    self.path,
                    e
                );
                false
            }
        }
    }

    /// Final flush before the process exits.
    pub fn shutdown(self) -> bool {
        tracing::info!(target: "tasks", "Saving tasks before closing...");
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logging::capture::with_captured_logs;
    use tempfile::TempDir;

    fn store_with(dir: &TempDir, content: &str) -> TasksStore {
        let path = dir.path().join("tasks_gui.json");
        std::fs::write(&path, content).unwrap();
        TasksStore::open(path)
    }

    #[test]
    fn test_add_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = TasksStore::open(dir.path().join("tasks_gui.json"));

        let rows = store.add("  buy milk  ").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "buy milk");
        assert!(!rows[0].done);
        assert!(helpers::parse_timestamp(&rows[0].timestamp).is_some());

        let on_disk = storage::load_tasks(store.path());
        assert_eq!(on_disk, store.tasks());
    }

    #[test]
    fn test_rejected_add_does_not_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks_gui.json");
        let mut store = TasksStore::open(&path);

        assert_eq!(store.add("   "), Err(TaskError::EmptyDescription));
        assert!(store.tasks().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_target_does_not_save() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&dir, "garbage");
        let key = TaskKey::new("ghost", "2024-01-01 00:00:00");

        assert!(matches!(store.toggle(&key), Err(TaskError::NotFound { .. })));
        assert!(matches!(store.remove(&key), Err(TaskError::NotFound { .. })));

        // The unreadable file stays untouched until a real save happens.
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "garbage"
        );
    }

    #[test]
    fn test_missing_target_logs_warning() {
        let dir = TempDir::new().unwrap();
        let mut store = TasksStore::open(dir.path().join("tasks_gui.json"));
        let key = TaskKey::new("ghost", "2024-01-01 00:00:00");

        let (result, logs) = with_captured_logs(|| store.toggle(&key));
        assert!(result.is_err());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Could not toggle: Could not find task: ghost"));

        let (result, logs) = with_captured_logs(|| store.remove(&key));
        assert!(result.is_err());
        assert!(logs.contains("Could not remove: Could not find task: ghost"));

        let (result, logs) = with_captured_logs(|| store.add("  "));
        assert_eq!(result, Err(TaskError::EmptyDescription));
        assert!(logs.contains("Task description cannot be empty"));
    }

    #[test]
    fn test_toggle_and_remove_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(
            &dir,
            r#"[{"description": "a", "done": false, "timestamp": "2024-01-01 00:00:00"},
                {"description": "b", "done": false, "timestamp": "2024-01-02 00:00:00"}]"#,
        );

        let rows = store.toggle(&TaskKey::new("a", "2024-01-01 00:00:00")).unwrap();
        assert_eq!(rows[0].description, "b");
        assert_eq!(rows[1].description, "a");
        assert!(rows[1].done);
        assert_eq!(storage::load_tasks(store.path()), store.tasks());

        let rows = store.remove(&TaskKey::new("b", "2024-01-02 00:00:00")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(storage::load_tasks(store.path()), store.tasks());
    }

    #[test]
    fn test_shutdown_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks_gui.json");
        let store = TasksStore::open(&path);

        assert!(store.shutdown());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
