//! Service settings for statusboard
//!
//! Settings control how the service runs (logging, collaborator file
//! locations, strict startup). They are loaded from:
//! 1. `--config FILE`, `STATUSBOARD_CONFIG_FILE`, or `statusboard.toml`
//! 2. `STATUSBOARD_*` environment variables (highest priority)
//!
//! The monitored configuration (`PORT`, `NODE_ENV`, `HOST`) lives in
//! [`crate::config_health`] instead.

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApplicationConfig, LoggerSettings, ServerConfig, Settings, StatusConfig};
