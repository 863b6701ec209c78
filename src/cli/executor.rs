//! Command executor for dispatching CLI commands

use std::process::ExitCode;
use std::sync::Arc;

use super::handlers::{CheckCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::config_health::ConfigurationManager;

/// Execute a CLI command with the given settings and manager
///
/// No subcommand means `serve` with defaults. `check` and `serve --dry-run`
/// exit with 1 when the configuration is unhealthy.
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    manager: Arc<ConfigurationManager>,
) -> anyhow::Result<ExitCode> {
    let healthy = dispatch(cli, settings, manager).await?;
    Ok(if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run the command; returns false when it should exit unsuccessfully
async fn dispatch(
    cli: &Cli,
    settings: Settings,
    manager: Arc<ConfigurationManager>,
) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::Check) => {
            CheckCommandHandler::new(manager).execute(&mut std::io::stdout().lock())
        }
        Some(Commands::Serve {
            host,
            port,
            dry_run,
            ..
        }) => {
            let handler = ServeCommandHandler::new(settings, manager, host.clone(), *port);
            if *dry_run {
                return handler.dry_run(&mut std::io::stdout().lock());
            }
            handler.execute().await?;
            Ok(true)
        }
        None => {
            ServeCommandHandler::new(settings, manager, None, None)
                .execute()
                .await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_health::{MapEnvironment, MemoryAlertSink, NODE_ENV};
    use clap::Parser;

    fn manager(vars: &[(&str, &str)]) -> Arc<ConfigurationManager> {
        Arc::new(ConfigurationManager::new(
            Arc::new(vars.iter().copied().collect::<MapEnvironment>()),
            Arc::new(MemoryAlertSink::new()),
        ))
    }

    #[tokio::test]
    async fn test_execute_check_healthy() {
        let cli = Cli::try_parse_from(["statusboard", "check"]).unwrap();
        let healthy = dispatch(&cli, Settings::default(), manager(&[]))
            .await
            .unwrap();
        assert!(healthy);
    }

    #[tokio::test]
    async fn test_execute_check_unhealthy() {
        let cli = Cli::try_parse_from(["statusboard", "check"]).unwrap();
        let healthy = dispatch(&cli, Settings::default(), manager(&[(NODE_ENV, "qa")]))
            .await
            .unwrap();
        assert!(!healthy);
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["statusboard", "serve", "--dry-run"]).unwrap();
        let healthy = dispatch(&cli, Settings::default(), manager(&[]))
            .await
            .unwrap();
        assert!(healthy);
    }
}
