use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "todo-desk";

/// Get the base storage directory following XDG Base Directory Specification.
/// Returns `$XDG_DATA_HOME/todo-desk` or `~/.local/share/todo-desk`.
/// Falls back to `./todo-desk` when no data directory can be resolved.
pub fn get_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Get the logs directory path.
/// Returns `{storage_dir}/logs`.
pub fn get_log_dir() -> PathBuf {
    get_storage_dir().join("logs")
}

/// Get the settings file path.
/// Returns `{storage_dir}/settings.json`.
pub fn get_settings_path() -> PathBuf {
    get_storage_dir().join("settings.json")
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling path used for write-then-rename saves: `tasks.json` -> `tasks.json.tmp`.
pub fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
