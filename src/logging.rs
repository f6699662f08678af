use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory for rolling log files, when `ENABLE_FILE_LOGS` is `true` or `1`.
fn file_log_dir<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let enabled = lookup("ENABLE_FILE_LOGS").is_some_and(|v| v == "true" || v == "1");
    enabled.then(|| PathBuf::from(lookup("LOG_DIR").unwrap_or_else(|| "./logs".to_string())))
}

/// Install the global subscriber. Console output goes to stderr because
/// stdout carries the quiz itself. Keep the returned guard alive for the
/// whole run so buffered file logs get flushed.
pub fn init_tracing(log_level: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match file_log_dir(|key| std::env::var(key).ok()) {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, &dir, "quiz.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(err) => {
                eprintln!("failed to create log directory {}: {err}", dir.display());
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_file_logs_off_by_default() {
        assert_eq!(file_log_dir(lookup(&[])), None);
        assert_eq!(file_log_dir(lookup(&[("ENABLE_FILE_LOGS", "yes")])), None);
    }

    #[test]
    fn test_file_log_dir() {
        assert_eq!(
            file_log_dir(lookup(&[("ENABLE_FILE_LOGS", "1")])),
            Some(PathBuf::from("./logs"))
        );
        assert_eq!(
            file_log_dir(lookup(&[("ENABLE_FILE_LOGS", "true"), ("LOG_DIR", "/var/log/quiz")])),
            Some(PathBuf::from("/var/log/quiz"))
        );
    }
}
