//! Subscriber setup
//!
//! A compact console layer on stderr is always installed. When
//! `logging.local_enabled` is set, a second layer writes one JSON object per
//! event to `{local_path}/fairwatt.log`, rotated per `local_rotation`.

use crate::config::LoggingConfig;
use crate::domain::{FairwattError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Base name of the rotated log files
pub const LOG_FILE_NAME: &str = "fairwatt.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background file writer alive; dropping it flushes pending lines
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG`, when set, replaces the filter derived from `log_level`.
///
/// # Errors
///
/// Fails on an unknown level, an unwritable log directory, or when a
/// subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use fairwatt::config::LoggingConfig;
/// use fairwatt::logging::init_logging;
///
/// let _guard = init_logging("debug", &LoggingConfig::default())?;
/// tracing::debug!(page = 1, "Fetching meters");
/// # Ok::<(), fairwatt::domain::FairwattError>(())
/// ```
pub fn init_logging(log_level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level)?;
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
    };

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter())
        .boxed()];

    let file_writer = if config.local_enabled {
        let (layer, guard) = json_file_layer(config, filter())?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| FairwattError::Configuration(format!("Logging already initialized: {e}")))?;

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

/// Our own events at `level`; HTTP client internals only when they warn
fn default_directives(level: Level) -> String {
    format!("fairwatt={level},reqwest=warn,hyper=warn")
}

fn rotation_for(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn json_file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        FairwattError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation_for(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

fn parse_log_level(raw: &str) -> Result<Level> {
    raw.trim().parse::<Level>().map_err(|_| {
        FairwattError::Configuration(format!(
            "Invalid log level: {raw}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}
