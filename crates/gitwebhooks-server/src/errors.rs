//! Server errors.

use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Could not build metrics handler,\n  caused by: {}", source)]
    MetricsBuildError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not register metric,\n  caused by: {}", source)]
    MetricsRegisterError { source: prometheus::Error },
}

/// Result alias for `ServerError`.
pub type Result<T, E = ServerError> = core::result::Result<T, E>;
