use serde::Serialize;
use serde_json::{Map, Value};

/// Timestamp layout used on disk and for display.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp given to stored records that predate the `timestamp` field.
pub const EPOCH_TIMESTAMP: &str = "1970-01-01 00:00:00";

pub const DEFAULT_DESCRIPTION: &str = "No Description";

pub const EMPTY_LIST_PLACEHOLDER: &str = "No tasks yet!";

/// A normalized task record. Every field is present and well-typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub timestamp: String,
    /// Keys written by other tools; carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(description: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            timestamp: timestamp.into(),
            extra: Map::new(),
        }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey {
            description: self.description.clone(),
            timestamp: self.timestamp.clone(),
        }
    }

    pub fn matches(&self, key: &TaskKey) -> bool {
        self.timestamp == key.timestamp && self.description == key.description
    }
}

/// Identity of a task: two tasks are the same iff description and timestamp both match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskKey {
    pub description: String,
    pub timestamp: String,
}

impl TaskKey {
    pub fn new(description: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A record as found on disk, before normalization. Keys may be missing, `null` or mistyped.
pub type StoredTask = Map<String, Value>;

/// One row of the display list handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub description: String,
    pub done: bool,
    pub timestamp: String,
    pub added_label: String,
    pub action_label: String,
    pub key: TaskKey,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            done: task.done,
            timestamp: task.timestamp.clone(),
            added_label: format!("Added: {}", task.timestamp),
            action_label: if task.done { "Undo" } else { "Complete" }.to_string(),
            key: task.key(),
        }
    }
}
