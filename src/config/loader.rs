//! Settings loader for statusboard
//!
//! Loads [`Settings`] from an optional TOML file overlaid with environment
//! variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable naming a specific settings file
pub const CONFIG_FILE_ENV: &str = "STATUSBOARD_CONFIG_FILE";

/// Settings file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "statusboard.toml";

/// Environment variable prefix for settings overrides
const ENV_PREFIX: &str = "STATUSBOARD";

/// Separator for nested settings keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Settings loader
///
/// Sources, lowest priority first:
/// 1. the explicit file (`--config` or `STATUSBOARD_CONFIG_FILE`, must exist),
///    otherwise `statusboard.toml` if it exists
/// 2. `STATUSBOARD_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader; `config_file` wins over `STATUSBOARD_CONFIG_FILE`
    pub fn new(config_file: Option<PathBuf>) -> Self {
        let config_file =
            config_file.or_else(|| std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from));
        Self { config_file }
    }

    /// The explicitly requested settings file, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load and validate settings from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref path) => Self::add_file_source(builder, path, true)?,
            None => Self::add_file_source(builder, Path::new(DEFAULT_CONFIG_FILE), false)?,
        };

        // STATUSBOARD_LOGGER__LEVEL -> logger.level
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Tests touching process environment variables run one at a time
#[cfg(test)]
pub(crate) static TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
