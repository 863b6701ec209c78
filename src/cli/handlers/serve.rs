//! Serve command handler
//!
//! Handles the serve command including dry-run reporting and server startup.

use std::io::Write;
use std::sync::Arc;

use crate::config::Settings;
use crate::config_health::ConfigurationManager;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    server: Server,
}

impl ServeCommandHandler {
    pub fn new(
        settings: Settings,
        manager: Arc<ConfigurationManager>,
        host: Option<String>,
        port: Option<u16>,
    ) -> Self {
        let server = Server::new(settings, manager)
            .with_host(host)
            .with_port(port);
        Self { server }
    }

    /// Start the server and block until shutdown
    pub async fn execute(self) -> anyhow::Result<()> {
        self.server.run().await
    }

    /// Report what `execute` would do without binding; returns whether the
    /// configuration is healthy.
    pub fn dry_run(&self, out: &mut impl Write) -> anyhow::Result<bool> {
        let health = self.server.startup_check()?;

        writeln!(out, "Server would bind to: {}", self.server.address())?;
        serde_json::to_writer_pretty(&mut *out, &health)?;
        writeln!(out)?;
        if health.healthy {
            writeln!(out, "Dry run completed: configuration is healthy")?;
        } else {
            writeln!(out, "Dry run completed: configuration is unhealthy")?;
        }
        Ok(health.healthy)
    }
}
