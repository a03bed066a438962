use std::path::Path;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Installs the global subscriber: a pretty console layer filtered by
/// `RUST_LOG` and, when `enable_file` is set, a daily rolling JSON file.
///
/// The returned guard flushes the file writer on drop and must be held
/// for the lifetime of the process.
pub fn init_logger(component: &str, is_dev: bool, enable_file: bool) -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let (file_layer, guard) = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

        let (file_writer, guard) = file_writer(component, Path::new(log_dir));

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Daily rolling `rust_app_<component>.log` in `log_dir`, written off-thread.
fn file_writer(component: &str, log_dir: &Path) -> (NonBlocking, WorkerGuard) {
    let file_name = format!("rust_app_{component}.log");
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
    non_blocking(file_appender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_writer_flushes_into_the_log_dir() {
        let log_dir = std::env::temp_dir().join(format!("catalog-logs-{}", std::process::id()));
        std::fs::create_dir_all(&log_dir).unwrap();

        let (mut writer, guard) = file_writer("unit", &log_dir);
        writer.write_all(b"{\"msg\":\"hello\"}\n").unwrap();
        drop(guard);

        let written: String = std::fs::read_dir(&log_dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("rust_app_unit.log"))
            .filter_map(|entry| std::fs::read_to_string(entry.path()).ok())
            .collect();
        assert!(written.contains("hello"));

        std::fs::remove_dir_all(&log_dir).ok();
    }
}
