use thiserror::Error;

/// Storage-related errors raised while reading or writing the task file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to parse data: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to write file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to create directory: {0}")]
    DirectoryError(String),
}

impl StorageError {
    pub fn directory(msg: impl Into<String>) -> Self {
        StorageError::DirectoryError(msg.into())
    }

    /// True when the file content was unreadable as a task list, as opposed to an I/O fault.
    pub fn is_malformed(&self) -> bool {
        matches!(self, StorageError::ParseError(_))
    }
}
