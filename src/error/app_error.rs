use thiserror::Error;

use crate::config::ConfigError;
use crate::status::StatusError;

/// Application-wide error type for the HTTP and CLI layers.
///
/// Configuration health problems are never errors; they are reported as
/// data in a `HealthResult`. This type covers the surrounding I/O.
#[derive(Error, Debug)]
pub enum AppError {
    /// A metadata file the request depends on does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// A status source (manifest, git, deployment file) failed
    #[error("Status source failed: {source_name}: {message}")]
    StatusSource {
        source_name: String,
        message: String,
    },

    /// A status source did not answer in time
    #[error("Status source timed out: {source_name}")]
    Timeout { source_name: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Attach the name of the status section that failed
    pub fn from_status(source_name: &str, error: StatusError) -> Self {
        match error {
            StatusError::NotFound { .. } => AppError::NotFound {
                message: error.to_string(),
            },
            StatusError::Timeout { .. } => AppError::Timeout {
                source_name: source_name.to_string(),
            },
            other => AppError::StatusSource {
                source_name: source_name.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            ConfigError::FileNotFound(_) => "config_file".to_string(),
            ConfigError::ParseError(_) | ConfigError::Other(_) => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
