//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output with an `EnvFilter`
//! - Optional JSON file output with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use alvys_etl::logging::init_logging;
//! use alvys_etl::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(entity = "trips", "Fetching");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log an entity moving from one run stage to another
///
/// # Example
///
/// ```no_run
/// use alvys_etl::log_stage_transition;
///
/// log_stage_transition!("trips", "PENDING", "TOKEN_ACQUIRED");
/// ```
#[macro_export]
macro_rules! log_stage_transition {
    ($entity:expr, $from:expr, $to:expr) => {
        tracing::debug!(
            entity = %$entity,
            from = %$from,
            to = %$to,
            "Stage transition"
        );
    };
}

/// Log a completed table write
///
/// # Example
///
/// ```no_run
/// use alvys_etl::log_table_written;
/// use std::time::Duration;
///
/// log_table_written!("TRIPS_RAW", 42, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_table_written {
    ($table:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            table = %$table,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Table written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use alvys_etl::log_error_with_context;
/// use alvys_etl::domain::AlvysError;
///
/// let error = AlvysError::Snapshot("missing file".to_string());
/// log_error_with_context!(&error, "Failed to read snapshot");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
