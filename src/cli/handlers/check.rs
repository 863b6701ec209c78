//! Check command handler
//!
//! Runs a single configuration check and prints the result as JSON.

use std::io::Write;
use std::sync::Arc;

use crate::config_health::ConfigurationManager;

/// Handler for the check command
pub struct CheckCommandHandler {
    manager: Arc<ConfigurationManager>,
}

impl CheckCommandHandler {
    pub fn new(manager: Arc<ConfigurationManager>) -> Self {
        Self { manager }
    }

    /// Write the health result to `out`; returns whether it was healthy
    pub fn execute(&self, out: &mut impl Write) -> anyhow::Result<bool> {
        let health = self.manager.run_config_check();
        serde_json::to_writer_pretty(&mut *out, &health)?;
        writeln!(out)?;
        Ok(health.healthy)
    }
}
