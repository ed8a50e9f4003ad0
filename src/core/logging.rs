use crate::shared::paths::{ensure_dir, get_log_dir};
use std::collections::HashMap;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Targets that get their own log file. Everything else goes to `system.log`.
const ROUTED_TARGETS: [&str; 1] = ["tasks"];

/// Guards that must be kept alive to ensure logs are flushed
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

/// Multi-target writer that routes logs to different files based on target
struct TargetWriter {
    writers: HashMap<String, NonBlocking>,
    system_writer: NonBlocking,
}

impl TargetWriter {
    fn new(writers: HashMap<String, NonBlocking>, system_writer: NonBlocking) -> Self {
        Self {
            writers,
            system_writer,
        }
    }
}

/// True when `target` is `name` itself or one of its `name::...` children.
fn target_matches(target: &str, name: &str) -> bool {
    target == name
        || target
            .strip_prefix(name)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        Box::new(self.system_writer.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        let target = meta.target();

        for (name, writer) in &self.writers {
            if target_matches(target, name) {
                return Box::new(writer.clone());
            }
        }

        Box::new(self.system_writer.clone())
    }
}

/// Initialize logging with per-target daily log files under the data directory.
///
/// `RUST_LOG` wins over `default_level`. If the log directory cannot be created or a
/// subscriber is already installed, logging stays disabled and the app keeps running.
pub fn init_logging(default_level: &str) -> LoggingGuards {
    let log_dir = get_log_dir();

    if let Err(e) = ensure_dir(&log_dir) {
        eprintln!("Failed to create logs directory {:?}: {}", log_dir, e);
        return LoggingGuards {
            _guards: Vec::new(),
        };
    }

    let (writer, guards) = build_writer(&log_dir);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global tracing subscriber: {}", e);
    }

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    LoggingGuards { _guards: guards }
}

fn build_writer(log_dir: &Path) -> (TargetWriter, Vec<WorkerGuard>) {
    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for target in ROUTED_TARGETS {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", target));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        writers.insert(target.to_string(), non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    (TargetWriter::new(writers, system_writer), guards)
}

/// In-memory log sink for asserting on emitted events in tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` with a subscriber that records every event into the returned sink.
    pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_target(true)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }
}
