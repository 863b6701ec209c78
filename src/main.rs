use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use statusboard::cli::{Cli, execute_command, init_logger_from_settings, load_settings};
use statusboard::config_health::ConfigurationManager;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger_from_settings(&settings)?;

    // Snapshot PORT, NODE_ENV and HOST before anything else can change them
    let manager = Arc::new(ConfigurationManager::from_process_env());

    execute_command(&cli, settings, manager).await
}
