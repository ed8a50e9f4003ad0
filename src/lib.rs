pub mod core;
pub mod shared;
pub mod shell;
pub mod tasks;

use crate::core::logging::init_logging;
use crate::core::settings::{load_settings, report_settings_error, AppSettings};
use crate::shared::paths::get_settings_path;
use crate::shell::Shell;
use crate::tasks::TasksStore;

pub fn run() {
    let (app_settings, settings_error) = match load_settings() {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };

    // Initialize logging first (before touching the task file)
    let _logging_guards = init_logging(&app_settings.log_level);

    if let Some(e) = settings_error {
        report_settings_error(&get_settings_path(), &e);
    }

    let store = TasksStore::open(&app_settings.tasks_file);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = Shell::new(store).run(stdin.lock(), &mut stdout) {
        tracing::error!(target: "system", "Console I/O failed: {}", e);
    }

    tracing::info!(target: "system", "Shutting down");
}
