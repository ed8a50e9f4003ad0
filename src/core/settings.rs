use crate::shared::paths::get_settings_path;
use crate::tasks::storage::DEFAULT_TASKS_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Task file location. Relative paths resolve against the working directory.
    pub tasks_file: PathBuf,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Loads `settings.json` from the data directory, or defaults when it does not exist.
///
/// Runs before logging is initialized, so a bad file is handed back to the caller to
/// report through [`report_settings_error`] once a subscriber is installed.
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    load_settings_at(&get_settings_path())
}

pub fn load_settings_at(path: &Path) -> Result<AppSettings, SettingsError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    load_settings_from_file(path)
}

pub fn report_settings_error(path: &Path, error: &SettingsError) {
    tracing::warn!(
        target: "system",
        "Ignoring settings at {:?}: {}",
        path,
        error
    );
}

pub fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}
