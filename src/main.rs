//! status-race (v1)
//!
//! Races two scripted status sources for one application id.
//!
//! # Architecture Overview
//!
//! ```text
//!   status-race.toml ──▶ config ──▶ sources.primary ───┐
//!                          │        sources.secondary ─┤
//!                          ▼                           ▼
//!                    observability            ┌──────────────────┐
//!                  (tracing to stderr)        │ RaceCoordinator  │
//!                                             │  RetryLoop  ×2   │
//!                                             └────────┬─────────┘
//!                                                      ▼
//!                                      OperationResult on stdout
//! ```
//!
//! Exit codes: 0 success, 1 operation failure, 2 configuration error,
//! 130 interrupted.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use status_race::config::validation::validate_config;
use status_race::config::{load_config, ConfigError};
use status_race::observability::logging::init_logging;
use status_race::source::ScriptedSource;
use status_race::RaceCoordinator;

#[derive(Parser)]
#[command(name = "status-race")]
#[command(about = "Ask two redundant sources for an application's status", long_about = None)]
struct Cli {
    /// Application to look up
    application_id: String,

    /// Configuration file
    #[arg(short, long, default_value = "status-race.toml")]
    config: PathBuf,

    /// Override operation.budget_ms
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Override observability.log_level
    #[arg(long)]
    log_level: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.config.display(), e);
            return Ok(ExitCode::from(2));
        }
    };
    if let Some(budget_ms) = cli.budget_ms {
        config.operation.budget_ms = budget_ms;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Err(errors) = validate_config(&config) {
        eprintln!("Error: {}", ConfigError::Validation(errors));
        return Ok(ExitCode::from(2));
    }

    init_logging(&config.observability)?;

    tracing::info!(
        config = %cli.config.display(),
        budget_ms = config.operation.budget_ms,
        primary = %config.sources.primary.name,
        secondary = %config.sources.secondary.name,
        "Configuration loaded"
    );

    let coordinator = RaceCoordinator::from_config(
        &config.operation,
        Arc::new(ScriptedSource::from_config(&config.sources.primary)),
        Arc::new(ScriptedSource::from_config(&config.sources.secondary)),
    );

    let result = tokio::select! {
        result = coordinator.perform_operation(&cli.application_id) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, abandoning operation");
            return Ok(ExitCode::from(130));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
