//! Service settings for statusboard
//!
//! These structures are loaded from an optional TOML file and `STATUSBOARD_*`
//! environment variables. They describe how the service itself runs and are
//! separate from the monitored `PORT`/`NODE_ENV`/`HOST` configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "statusboard".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_console_format() -> String {
    "full".to_string()
}

fn default_log_path() -> String {
    "logs/statusboard.log".to_string()
}

fn default_file_format() -> String {
    "json".to_string()
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_deployment_status_path() -> PathBuf {
    PathBuf::from("deployment-status.json")
}

fn default_git_timeout() -> u64 {
    5
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP server behaviour
///
/// The bind address is not configured here: it comes from the monitored
/// `HOST`/`PORT` settings, optionally overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Refuse to start when the startup configuration check is unhealthy
    #[serde(default)]
    pub strict: bool,
}

// ============================================================================
// Status Configuration
// ============================================================================

/// Locations of the metadata shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Manifest listing dependencies (package.json layout)
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Git working tree used for last-commit lookups
    #[serde(default = "default_repository_path")]
    pub repository_path: PathBuf,

    /// JSON file describing the current deployment
    #[serde(default = "default_deployment_status_path")]
    pub deployment_status_path: PathBuf,

    /// Upper bound for the git command, in seconds
    #[serde(default = "default_git_timeout")]
    pub git_timeout: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            repository_path: default_repository_path(),
            deployment_status_path: default_deployment_status_path(),
            git_timeout: default_git_timeout(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_console_format")]
    pub format: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
            format: default_console_format(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_file_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_file_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(
            self.console.enabled,
            self.console.colored,
            parse_format("logger.console.format", &self.console.format)?,
        );
        let file = FileConfig {
            enabled: self.file.enabled,
            path: PathBuf::from(self.file.path),
            append: self.file.append,
            format: parse_format("logger.file.format", &self.file.format)?,
        };

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_format(field: &str, format: &str) -> Result<LogFormat, ConfigError> {
    format
        .parse::<LogFormat>()
        .map_err(|e| ConfigError::ValidationError {
            field: field.to_string(),
            message: e.to_string(),
        })
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}
