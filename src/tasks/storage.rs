use super::helpers::{now_timestamp, parse_timestamp};
use super::types::{StoredTask, Task, DEFAULT_DESCRIPTION, EPOCH_TIMESTAMP};
use crate::shared::errors::StorageError;
use crate::shared::paths::{ensure_dir, temp_sibling};
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Default task file, resolved against the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks_gui.json";

const JSON_INDENT: &[u8] = b"    ";

// ============================================================================
// Loading
// ============================================================================

/// Loads the task list from `path`, never failing.
///
/// A missing or zero-length file is an empty list. Anything unreadable is logged
/// and also treated as an empty list; the file on disk is left as it is until the
/// next save overwrites it.
pub fn load_tasks(path: &Path) -> Vec<Task> {
    match load_from_file(path, &now_timestamp()) {
        Ok(tasks) => {
            tracing::debug!(
                target: "tasks::storage",
                path = %path.display(),
                count = tasks.len(),
                "Loaded tasks"
            );
            tasks
        }
        Err(e) if e.is_malformed() => {
            tracing::warn!(
                target: "tasks::storage",
                "'{}' format incorrect ({}). Starting fresh.",
                path.display(),
                e
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(
                target: "tasks::storage",
                "Error loading tasks from '{}': {}. Starting fresh.",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// Reads and normalizes the task file. `now` replaces unparsable timestamps.
pub fn load_from_file(path: &Path, now: &str) -> Result<Vec<Task>, StorageError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::ReadError(e)),
    };

    if content.is_empty() {
        tracing::info!(
            target: "tasks::storage",
            "'{}' is empty. Starting fresh.",
            path.display()
        );
        return Ok(Vec::new());
    }

    let stored: Vec<StoredTask> = serde_json::from_str(&content)?;
    Ok(stored
        .into_iter()
        .map(|raw| normalize_task(raw, now))
        .collect())
}

/// Fills in missing fields and replaces invalid ones. Valid fields pass through unchanged.
///
/// A key that is present with `null` counts as invalid, not as missing.
pub fn normalize_task(mut raw: StoredTask, now: &str) -> Task {
    let description = match raw.remove("description") {
        None => DEFAULT_DESCRIPTION.to_string(),
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        Some(other) => {
            tracing::warn!(
                target: "tasks::storage",
                value = %other,
                "Replacing invalid task description"
            );
            DEFAULT_DESCRIPTION.to_string()
        }
    };

    let done = match raw.remove("done") {
        None => false,
        Some(Value::Bool(done)) => done,
        Some(other) => {
            tracing::warn!(
                target: "tasks::storage",
                description = %description,
                value = %other,
                "Invalid completion flag, marking task as not done"
            );
            false
        }
    };

    let timestamp = match raw.remove("timestamp") {
        None => EPOCH_TIMESTAMP.to_string(),
        Some(Value::String(ts)) if parse_timestamp(&ts).is_some() => ts,
        Some(other) => {
            tracing::warn!(
                target: "tasks::storage",
                value = %other,
                "Correcting invalid timestamp format for task: {}",
                description
            );
            now.to_string()
        }
    };

    Task {
        description,
        done,
        timestamp,
        extra: raw,
    }
}

// ============================================================================
// Saving
// ============================================================================

/// Writes the whole list to `path` as a 4-space indented JSON array.
///
/// The data is written to a `.tmp` sibling first and renamed over the target.
pub fn save_tasks(tasks: &[Task], path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)
            .map_err(|e| StorageError::directory(format!("{}: {}", parent.display(), e)))?;
    }

    let content = to_pretty_json(tasks)?;
    let tmp_path = temp_sibling(path);

    if let Err(e) = std::fs::write(&tmp_path, &content) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(StorageError::WriteError(e));
    }
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(StorageError::WriteError(e));
    }

    tracing::debug!(
        target: "tasks::storage",
        path = %path.display(),
        count = tasks.len(),
        "Saved tasks"
    );
    Ok(())
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
