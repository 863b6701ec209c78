//! Validation of the service settings
//!
//! Unlike the monitored configuration, service settings stop at the first
//! problem: the service cannot start on invalid settings.

use crate::config::error::ConfigError;
use crate::config::settings::{LoggerSettings, Settings, StatusConfig};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Longest accepted git timeout, in seconds
const MAX_GIT_TIMEOUT: u64 = 300;

impl StatusConfig {
    /// Validate status collaborator settings
    ///
    /// # Validation Rules
    /// - Paths must not be empty
    /// - Git timeout must be between 1 and 300 seconds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("status.manifest_path", &self.manifest_path),
            ("status.repository_path", &self.repository_path),
            ("status.deployment_status_path", &self.deployment_status_path),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: "Path must not be empty.".to_string(),
                });
            }
        }

        if self.git_timeout == 0 || self.git_timeout > MAX_GIT_TIMEOUT {
            return Err(ConfigError::ValidationError {
                field: "status.git_timeout".to_string(),
                message: format!(
                    "Git timeout must be between 1 and {} seconds.",
                    MAX_GIT_TIMEOUT
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - Formats must be one of: full, compact, json
    /// - If file logging is enabled, path must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        let formats = [
            ("logger.console.format", &self.console.format),
            ("logger.file.format", &self.file.format),
        ];
        for (field, format) in formats {
            if !VALID_LOG_FORMATS.contains(&format.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all settings, returning the first error encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name must not be empty.",
            ));
        }
        self.status.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
