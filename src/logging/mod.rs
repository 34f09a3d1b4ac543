//! Logging and observability
//!
//! Structured logging on `tracing`:
//! - human-readable console output on stderr
//! - optional JSON log files with daily or hourly rotation
//! - level taken from `[application] log_level`, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use fairwatt::logging::init_logging;
//! use fairwatt::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Console started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a completed page fetch
///
/// # Example
///
/// ```no_run
/// use fairwatt::log_fetch_complete;
///
/// log_fetch_complete!(1, 10, Some(42usize));
/// ```
#[macro_export]
macro_rules! log_fetch_complete {
    ($page:expr, $count:expr, $total:expr) => {
        tracing::info!(
            page = $page,
            count = $count,
            total = ?$total,
            "Fetched meter page"
        );
    };
}

/// Log an export file written to disk
///
/// # Example
///
/// ```no_run
/// use fairwatt::log_export_written;
///
/// log_export_written!("exports/meters_2025-03-10.xlsx", 8);
/// ```
#[macro_export]
macro_rules! log_export_written {
    ($path:expr, $rows:expr) => {
        tracing::info!(
            path = %$path,
            rows = $rows,
            "Export written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use fairwatt::log_error_with_context;
/// use fairwatt::domain::FairwattError;
///
/// let error = FairwattError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::FairwattError;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_fetch_complete!(2, 25usize, None::<usize>);
        log_export_written!("out/meters_2025-01-01.csv", 3usize);
        let error = FairwattError::Other("boom".to_string());
        log_error_with_context!(&error, "while testing");
    }
}
