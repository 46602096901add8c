use hello_pipeline_config::LogConfig;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Name of the active log file inside `write_path`.
const LOG_FILE_NAME: &str = "logs.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Global logger already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the background file writer alive; logs still buffered are flushed on drop.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file_writer: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Translate the configured level into an `EnvFilter` directive.
///
/// `http` is not a tracing level: it keeps everything else at `info` and turns
/// on the per-request access log emitted on the `http` target.
fn filter_directive(level: &str) -> &str {
    if level == "http" { "info,http=debug" } else { level }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter_directive(level)).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

fn fmt_layer<W>(json: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}

/// Open `write_path/logs.log` with size-based rotation.
///
/// `write_max_files` counts the active file, so 5 keeps `logs.log` plus
/// `logs.log.1` through `logs.log.4`.
fn file_writer(config: &LogConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(&config.write_path)?;

    let log_file_path = PathBuf::from(&config.write_path).join(LOG_FILE_NAME);
    let rotated_files_count = config.write_max_files.saturating_sub(1);
    let file_appender = BasicRollingFileAppender::new(
        log_file_path,
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        rotated_files_count,
    )?;

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Initialize tracing/logging with the specified configuration
///
/// Console output is always on; a rotated log file is added when
/// `config.write` is set. Files never contain ANSI escapes.
///
/// # Examples
/// ```no_run
/// use hello_pipeline::logging;
/// use hello_pipeline_config::LogConfig;
///
/// let _guard = logging::init_with_config(&LogConfig::default())?;
/// # Ok::<(), hello_pipeline::logging::LoggingError>(())
/// ```
pub fn init_with_config(config: &LogConfig) -> Result<LogGuard, LoggingError> {
    let filter = build_filter(&config.level)?;

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        config.json,
        !config.strip_ansi,
        std::io::stdout,
    )];

    let file_guard = if config.write {
        let (non_blocking, guard) = file_writer(config)?;
        layers.push(fmt_layer(config.json, false, non_blocking));
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(LogGuard {
        _file_writer: file_guard,
    })
}
