use std::io;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, writer::MakeWriterExt, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::{Config, LogFormat};

const LOG_FILE_PREFIX: &str = "logging";
const LOG_FILE_SUFFIX: &str = "log";
const LOG_FILES_KEPT: usize = 7;

/// Console writer that sends error events to `err` and everything else to
/// `out`.
pub fn split_by_level<O, E>(out: O, err: E) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    O: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    err.with_max_level(Level::ERROR).or_else(out)
}

/// Installs the global subscriber: console output in the configured format,
/// plus every event as JSON in a daily-rotated file under `log_dir`.
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process logs.
pub fn init(config: &Config) -> Result<WorkerGuard, InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_FILES_KEPT)
        .build(&config.log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_writer = split_by_level(io::stdout, io::stderr);
    let console = match config.log_format {
        LogFormat::Text => fmt::layer().with_writer(console_writer).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(console_writer).boxed(),
    };
    let file = fmt::layer().json().with_ansi(false).with_writer(file_writer);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}
