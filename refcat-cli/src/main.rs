//! refcat - keeps refractive-index catalog pages in newest-first order
//!
//! Main entry point: parses flags, sets up logging, resolves configuration,
//! and hands off to the catalog subcommands.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use refcat_core::config::Settings;
use refcat_core::CatalogError;

mod catalog_cli;

/// Exit status for load, config and write failures; `check` uses 1 for
/// catalogs that are out of order
const EXIT_ERROR: u8 = 2;

use catalog_cli::{CatalogCommand, CommandContext};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "refcat",
    about = "Sort the pages of a refractiveindex.info catalog newest-first",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: CatalogCommand,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    log_json: bool,

    /// Override configuration file path
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Override the database directory
    #[clap(long, global = true)]
    database: Option<PathBuf>,
}

fn initialize_tracing(log_level: &LogLevel, json: bool) {
    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    // Logs go to stderr; stdout carries command output
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.log_json);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(?settings, "Resolved settings");

    let context = CommandContext {
        settings,
        database: cli.database,
    };
    cli.command.execute(&context)
}

/// Name of the catalog error kind anywhere in the chain
fn error_kind(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CatalogError>())
        .map(CatalogError::kind)
        .unwrap_or("Error")
}

fn report_error(err: &anyhow::Error) {
    let kind = error_kind(err);
    error!(kind, "{err:#}");
    eprintln!("Error [{kind}]: {err:#}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "refcat",
            "sort",
            "--log-level",
            "debug",
            "--database",
            "/db",
        ])
        .unwrap();
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.database, Some(PathBuf::from("/db")));
        assert!(!cli.log_json);
    }

    #[test]
    fn test_error_kind_found_through_context() {
        let err = anyhow::Error::new(CatalogError::SourceNotFound {
            path: PathBuf::from("missing.yml"),
        })
        .context("Failed to load catalog");
        assert_eq!(error_kind(&err), "SourceNotFound");

        let plain = anyhow::anyhow!("something else");
        assert_eq!(error_kind(&plain), "Error");
    }
}
