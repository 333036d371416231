//! Logging setup for the CloudFS client.
//!
//! One global `tracing` subscriber: a compact stderr layer, plus a
//! daily-rotated `cloudfs.log` file layer when a log directory is usable.
//! Request logging never includes the access token.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "cloudfs.log";

/// Keeps the file writer alive. Drop it to flush the log file.
pub struct LogGuard {
    file: Option<(PathBuf, WorkerGuard)>,
}

impl LogGuard {
    /// Directory receiving the log file, or `None` when logging to the console only.
    pub fn log_dir(&self) -> Option<&Path> {
        self.file.as_ref().map(|(dir, _)| dir.as_path())
    }
}

/// Install the global subscriber.
///
/// `level` is a filter directive ("debug", "cfs_api=trace", ...); an invalid
/// directive falls back to `info`. When `log_dir` is `None` or cannot be
/// created, only the console layer is installed and a warning is logged.
/// `json_output` switches the file layer to JSON lines.
///
/// A second call in the same process leaves the first subscriber in place.
pub fn init_logging(level: &str, log_dir: Option<&Path>, json_output: bool) -> LogGuard {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut dir_error = None;
    let file = match log_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let (writer, guard) =
                    tracing_appender::non_blocking(rolling::daily(dir, LOG_FILE_NAME));
                Some((dir.to_path_buf(), writer, guard))
            }
            Err(e) => {
                dir_error = Some(format!("{}: {e}", dir.display()));
                None
            }
        },
        None => None,
    };

    let (file_layer, file) = match file {
        Some((dir, writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            let layer: Box<dyn Layer<Registry> + Send + Sync> = if json_output {
                layer.json().boxed()
            } else {
                layer.boxed()
            };
            (Some(layer), Some((dir, guard)))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .ok();

    match dir_error {
        Some(reason) => tracing::warn!("file logging disabled, console only ({reason})"),
        None => tracing::debug!("logging initialized at level={level}"),
    }

    LogGuard { file }
}
