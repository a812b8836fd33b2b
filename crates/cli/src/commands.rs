//! CLI command implementations

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use config::{ConfigLoader, ConfigResolver, ConfigValidator, RawConfig, Severity, ValidationReport};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Check the configuration and report problems
    Validate,

    /// Write a default components.json
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Component style
        #[arg(long, default_value = config::DEFAULT_STYLE)]
        style: String,

        /// Use jsconfig.json instead of tsconfig.json
        #[arg(long)]
        no_typescript: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Command {
    pub async fn run(self, cwd: &Path) -> Result<ExitCode> {
        match self {
            Command::Config { format } => show_config(cwd, format).await,
            Command::Validate => validate(cwd).await,
            Command::Init {
                force,
                style,
                no_typescript,
            } => init(cwd, force, style, !no_typescript),
        }
    }
}

async fn show_config(cwd: &Path, format: OutputFormat) -> Result<ExitCode> {
    let Some(config) = ConfigResolver::new().get_config(cwd).await? else {
        error!("No components.json found in {}", cwd.display());
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", render(&config, format)?);
    Ok(ExitCode::SUCCESS)
}

async fn validate(cwd: &Path) -> Result<ExitCode> {
    let Some(config) = ConfigResolver::new().get_config(cwd).await? else {
        error!("No components.json found in {}", cwd.display());
        return Ok(ExitCode::FAILURE);
    };

    let report = ConfigValidator::validate(&config);
    print_report(&report);

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init(cwd: &Path, force: bool, style: String, typescript: bool) -> Result<ExitCode> {
    let config = RawConfig {
        style,
        typescript,
        ..ConfigLoader::default()
    };

    ConfigLoader::create_example(cwd, &config, force)
        .with_context(|| format!("Failed to initialise {}", cwd.display()))?;

    info!("Wrote components.json to {}", cwd.display());
    Ok(ExitCode::SUCCESS)
}

/// Serialize a value in the requested output format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to render JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
    };
    Ok(rendered.trim_end().to_string())
}

fn print_report(report: &ValidationReport) {
    for issue in report.issues() {
        match issue.severity {
            Severity::Error => error!("{issue}"),
            Severity::Warning => warn!("{issue}"),
        }
    }
    println!("{}", report.summary());
}
