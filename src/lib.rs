//! Statusboard Library
//!
//! Configuration health monitoring for a running service, plus the HTTP
//! dashboard and CLI built around it.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod config_health;
pub mod error;
pub mod logger;
pub mod server;
pub mod state;
pub mod status;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
