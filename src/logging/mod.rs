//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Console output
//! - Optional JSON file logging with rotation
//!
//! Original inventory values are never logged; fields carry sheet names,
//! counts and durations only.
//!
//! # Example
//!
//! ```no_run
//! use rvanon::logging::init_logging;
//! use rvanon::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(sheets = 27, "Workbook read");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a sheet pass
///
/// # Example
///
/// ```no_run
/// use rvanon::log_sheet_start;
///
/// log_sheet_start!("vInfo", 1200);
/// ```
#[macro_export]
macro_rules! log_sheet_start {
    ($sheet:expr, $rows:expr) => {
        tracing::debug!(sheet = %$sheet, rows = $rows, "Processing sheet");
    };
}

/// Log the completion of a sheet pass
///
/// # Example
///
/// ```no_run
/// use rvanon::log_sheet_complete;
/// use std::time::Duration;
///
/// log_sheet_complete!("vInfo", 3400, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_sheet_complete {
    ($sheet:expr, $cells:expr, $duration:expr) => {
        tracing::info!(
            sheet = %$sheet,
            cells = $cells,
            duration_ms = $duration.as_millis(),
            "Sheet processed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use rvanon::log_error_with_context;
/// use rvanon::domain::RvanonError;
///
/// let error = RvanonError::Configuration("Invalid config".to_string());
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
