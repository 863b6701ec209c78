//! CLI module for statusboard
//!
//! - Argument parsing with clap
//! - Settings loading with CLI overrides
//! - Command dispatch to the serve and check handlers

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands};

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load settings and apply CLI overrides
///
/// `--verbose`/`--quiet` replace the configured log level and
/// `serve --strict` turns on `server.strict`. The result is validated again
/// after the overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut settings = ConfigLoader::new(cli.config.clone()).load()?;

    if let Some(level) = cli.log_level_override() {
        settings.logger.level = level.to_string();
    }
    if let Some(Commands::Serve { strict: true, .. }) = cli.command {
        settings.server.strict = true;
    }

    settings.validate()?;
    Ok(settings)
}

/// Initialize the global logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::TEST_MUTEX;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_settings_from_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let file = settings_file("[logger]\nlevel = \"warn\"\n");
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["statusboard", "--config", path, "check"]).unwrap();

        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.logger.level, "warn");
        assert!(!settings.server.strict);
    }

    #[test]
    fn test_load_settings_applies_overrides() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let file = settings_file("[logger]\nlevel = \"warn\"\n");
        let path = file.path().to_str().unwrap();
        let cli =
            Cli::try_parse_from(["statusboard", "--config", path, "-v", "serve", "--strict"])
                .unwrap();

        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.logger.level, "debug");
        assert!(settings.server.strict);
    }

    #[test]
    fn test_load_settings_invalid_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let file = settings_file("[status]\ngit_timeout = 0\n");
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["statusboard", "--config", path]).unwrap();

        let err = load_settings(&cli).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "status.git_timeout")
        );
    }
}
