//! Logging
//!
//! Structured logging through `tracing`:
//! - human-readable console output filtered by log level
//! - optional JSON log files with daily or hourly rotation
//! - job-level macros so every job is logged with its full identity
//!
//! # Example
//!
//! ```no_run
//! use parametric_export::logging::init_logging;
//! use parametric_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a finished job
///
/// # Example
///
/// ```no_run
/// use parametric_export::log_job_progress;
/// use std::path::Path;
///
/// log_job_progress!(3, 12, "Drawer", "COLUMNS=1, ROWS=3", Path::new("out/Drawer.stl"));
/// ```
#[macro_export]
macro_rules! log_job_progress {
    ($completed:expr, $total:expr, $body:expr, $combination:expr, $path:expr) => {
        tracing::info!(
            completed = $completed,
            total = $total,
            body = %$body,
            combination = %$combination,
            path = %$path.display(),
            "Exported body"
        );
    };
}

/// Log a failed job with its identity and reason
///
/// # Example
///
/// ```no_run
/// use parametric_export::log_job_failure;
/// use parametric_export::domain::ModelError;
/// use std::path::Path;
///
/// let error = ModelError::RecomputeFailed("solver diverged".to_string());
/// log_job_failure!(&error, "Drawer", "COLUMNS=1", Path::new("out/Drawer.stl"));
/// ```
#[macro_export]
macro_rules! log_job_failure {
    ($error:expr, $body:expr, $combination:expr, $path:expr) => {
        tracing::error!(
            kind = %$error.kind(),
            error = %$error,
            body = %$body,
            combination = %$combination,
            path = %$path.display(),
            "Job failed"
        );
    };
}

/// Log a model call at debug level
///
/// # Example
///
/// ```no_run
/// use parametric_export::log_model_call;
///
/// log_model_call!("openscad", "recompute");
/// log_model_call!("openscad", "set_parameter", "COLUMNS=2");
/// ```
#[macro_export]
macro_rules! log_model_call {
    ($backend:expr, $operation:expr) => {
        tracing::debug!(backend = $backend, operation = $operation, "Model call");
    };
    ($backend:expr, $operation:expr, $detail:expr) => {
        tracing::debug!(
            backend = $backend,
            operation = $operation,
            detail = %$detail,
            "Model call"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::ModelError;
    use std::path::Path;

    #[test]
    fn test_macros_expand() {
        let path = Path::new("output/Size2/Handle-Size2.stl");
        let error = ModelError::ExportFailed {
            body: "Handle".to_string(),
            reason: "disk full".to_string(),
        };

        log_job_progress!(1, 2, "Handle", "Size=2", path);
        log_job_failure!(&error, "Handle", "Size=2", path);
        log_model_call!("dry-run", "recompute");
        log_model_call!("dry-run", "set_parameter", "Size=2");
    }
}
