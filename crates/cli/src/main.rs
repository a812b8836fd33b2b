//! Scaffold CLI - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::ScaffoldError;

mod commands;

use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "scaffold")]
#[command(about = "Inspect and initialise component scaffolding configuration")]
#[command(version, long_about = None)]
struct Cli {
    /// Project directory
    #[arg(long, global = true, env = "SCAFFOLD_CWD")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    init_logging()?;

    match dotenv_result {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => {}
    }

    let cli = Cli::parse();
    let cwd = match cli.cwd {
        Some(cwd) => cwd,
        None => env::current_dir().context("Failed to determine working directory")?,
    };
    debug!("Scaffold v{} in {}", env!("CARGO_PKG_VERSION"), cwd.display());

    match cli.command.run(&cwd).await {
        Ok(code) => Ok(code),
        Err(e) => {
            if let Some(ScaffoldError::MissingPathMapping { name }) = e.downcast_ref::<ScaffoldError>() {
                error!("{}", e);
                info!("Create a {} with compilerOptions.paths for your aliases and try again", name);
                return Ok(ExitCode::FAILURE);
            }
            Err(e)
        }
    }
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .without_time()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    debug!("Log level: {}, format: {}", log_level, log_format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::commands::OutputFormat;

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::try_parse_from(["scaffold", "config", "--format", "yaml", "--cwd", "/proj"]).unwrap();
        assert_eq!(cli.cwd, Some(PathBuf::from("/proj")));
        assert!(matches!(cli.command, Command::Config { format: OutputFormat::Yaml }));
    }

    #[test]
    fn test_parse_init_command() {
        let cli = Cli::try_parse_from(["scaffold", "init", "--force", "--no-typescript"]).unwrap();
        match cli.command {
            Command::Init {
                force,
                style,
                no_typescript,
            } => {
                assert!(force);
                assert!(no_typescript);
                assert_eq!(style, "default");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["scaffold", "deploy"]).is_err());
    }
}
