//! CLI argument parsing with clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::build;

/// Configuration health and deployment status for a running service
#[derive(Parser, Debug)]
#[command(name = "statusboard")]
#[command(about = "Configuration health and deployment status for a running service")]
#[command(long_about = "
Statusboard snapshots PORT, NODE_ENV and HOST at startup, validates them and
reports drift when the live environment no longer matches the snapshot.
It serves the result over HTTP together with dependency, commit and
deployment metadata.

EXAMPLES:
    # Start the server (default command)
    statusboard serve

    # Override the bind address taken from HOST and PORT
    statusboard serve --host 0.0.0.0 --port 8080

    # Refuse to start with an unhealthy configuration
    statusboard serve --strict

    # Print the health result without starting the server
    statusboard serve --dry-run

    # One-shot check for scripts; exits 1 when unhealthy
    statusboard check

    # Use a custom settings file
    statusboard --config /etc/statusboard/statusboard.toml serve
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file path
    ///
    /// TOML file with `application`, `server`, `status` and `logger`
    /// sections. The file must exist and be readable.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Sets the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Sets the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Runs one configuration check, then serves the dashboard, health and
    /// status endpoints. The bind address comes from HOST and PORT unless
    /// overridden.
    Serve {
        /// Host address to bind to, instead of HOST
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on, instead of PORT
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Print the startup health result and exit
        ///
        /// Exits 0 when the configuration is healthy, 1 otherwise.
        #[arg(long)]
        dry_run: bool,

        /// Abort startup when the configuration is unhealthy
        #[arg(long)]
        strict: bool,
    },
    /// Run one configuration check and print the result as JSON
    ///
    /// Exits 0 when the configuration is healthy, 1 otherwise.
    Check,
}

impl Cli {
    /// Log level forced by --verbose or --quiet
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
