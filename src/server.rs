//! Server module for managing HTTP server lifecycle
//!
//! This module handles the startup configuration check, binding and
//! graceful shutdown.

use std::net::Ipv6Addr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::create_router;
use crate::config::Settings;
use crate::config_health::{ConfigurationManager, DEFAULT_HOST, DEFAULT_PORT, HealthResult};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    manager: Arc<ConfigurationManager>,
    host: Option<String>,
    port: Option<u16>,
}

impl Server {
    pub fn new(settings: Settings, manager: Arc<ConfigurationManager>) -> Self {
        Self {
            settings,
            manager,
            host: None,
            port: None,
        }
    }

    /// Override the host taken from the monitored configuration
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    /// Override the port taken from the monitored configuration
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Address to bind: CLI overrides first, then HOST/PORT from the
    /// manager. Falls back to the defaults when HOST or PORT is unusable.
    pub fn address(&self) -> String {
        let (host, port) = match (self.host.clone(), self.port) {
            (Some(host), Some(port)) => (host, port),
            (host, port) => {
                let (config_host, config_port) =
                    self.manager.bind_address().unwrap_or_else(|| {
                        tracing::warn!(
                            host = DEFAULT_HOST,
                            port = DEFAULT_PORT,
                            "HOST or PORT unusable for binding, using defaults"
                        );
                        (DEFAULT_HOST.to_string(), DEFAULT_PORT as u16)
                    });
                (host.unwrap_or(config_host), port.unwrap_or(config_port))
            }
        };
        format_address(&host, port)
    }

    /// Run one configuration check before accepting traffic.
    ///
    /// An unhealthy result is logged; with `server.strict` it aborts startup.
    pub fn startup_check(&self) -> anyhow::Result<HealthResult> {
        let health = self.manager.run_config_check();
        if health.healthy {
            tracing::info!("Startup configuration check passed");
            return Ok(health);
        }

        tracing::warn!(
            validation_errors = health.validation.errors.len(),
            drift_changes = health.drift.changes.len(),
            strict = self.settings.server.strict,
            "Startup configuration check failed"
        );
        if self.settings.server.strict {
            anyhow::bail!(
                "configuration is unhealthy: {} validation error(s)",
                health.validation.errors.len()
            );
        }
        Ok(health)
    }

    /// Start the server and run until shutdown signal
    ///
    /// # Errors
    /// - Unhealthy configuration in strict mode
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            "Application starting"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = self.settings.logger.console.enabled,
            file_enabled = self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        self.startup_check()?;

        let address = self.address();
        let state = AppState::new(self.manager.clone(), self.settings.clone());
        let router = create_router(state);
        tracing::info!("Router configured");

        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// `host:port`, with IPv6 literals in brackets.
fn format_address(host: &str, port: u16) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_health::{HOST, MapEnvironment, MemoryAlertSink, NODE_ENV, PORT};

    fn manager(vars: &[(&str, &str)]) -> Arc<ConfigurationManager> {
        Arc::new(ConfigurationManager::new(
            Arc::new(vars.iter().copied().collect::<MapEnvironment>()),
            Arc::new(MemoryAlertSink::new()),
        ))
    }

    fn strict_settings() -> Settings {
        let mut settings = Settings::default();
        settings.server.strict = true;
        settings
    }

    #[test]
    fn test_address_from_manager() {
        let server = Server::new(
            Settings::default(),
            manager(&[(HOST, "0.0.0.0"), (PORT, "8080")]),
        );
        assert_eq!(server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_address_defaults() {
        let server = Server::new(Settings::default(), manager(&[]));
        assert_eq!(server.address(), "localhost:3000");
    }

    #[test]
    fn test_address_overrides() {
        let server = Server::new(Settings::default(), manager(&[(PORT, "8080")]))
            .with_host(Some("127.0.0.1".to_string()))
            .with_port(Some(9000));
        assert_eq!(server.address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_address_falls_back_on_invalid_port() {
        let server = Server::new(Settings::default(), manager(&[(PORT, "abc")]));
        assert_eq!(server.address(), "localhost:3000");
    }

    #[test]
    fn test_address_overrides_bypass_invalid_port() {
        let server = Server::new(Settings::default(), manager(&[(PORT, "abc")]))
            .with_host(Some("127.0.0.1".to_string()))
            .with_port(Some(9000));
        assert_eq!(server.address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_address_port_override_keeps_configured_host() {
        let server = Server::new(Settings::default(), manager(&[(HOST, "0.0.0.0")]))
            .with_port(Some(9000));
        assert_eq!(server.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_address_brackets_ipv6_host() {
        let server = Server::new(Settings::default(), manager(&[(HOST, "::1")]));
        assert_eq!(server.address(), "[::1]:3000");

        let server = Server::new(Settings::default(), manager(&[]))
            .with_host(Some("::".to_string()))
            .with_port(Some(8080));
        assert_eq!(server.address(), "[::]:8080");
    }

    #[test]
    fn test_startup_check_lenient() {
        let server = Server::new(Settings::default(), manager(&[(NODE_ENV, "staging")]));
        let health = server.startup_check().unwrap();
        assert!(!health.healthy);
    }

    #[test]
    fn test_startup_check_strict_fails() {
        let server = Server::new(strict_settings(), manager(&[(NODE_ENV, "staging")]));
        assert!(server.startup_check().is_err());
    }

    #[test]
    fn test_startup_check_strict_passes_when_healthy() {
        let server = Server::new(strict_settings(), manager(&[]));
        assert!(server.startup_check().unwrap().healthy);
    }
}
