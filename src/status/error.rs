//! Errors raised by the status collaborators

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatusError {
    /// A metadata file does not exist
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A metadata file exists but could not be read
    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A metadata file is not the JSON we expect
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// git could not be run or reported an error
    #[error("git failed: {message}")]
    Git { message: String },

    /// git did not finish in time
    #[error("git did not finish within {seconds}s")]
    Timeout { seconds: u64 },
}

impl StatusError {
    /// Map an IO error on `path` to `NotFound` or `Io`
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StatusError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StatusError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        StatusError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn git(message: impl Into<String>) -> Self {
        StatusError::Git {
            message: message.into(),
        }
    }
}

pub type StatusResult<T> = Result<T, StatusError>;
