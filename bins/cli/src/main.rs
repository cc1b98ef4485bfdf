//! Expensio command-line interface
//!
//! Reads JSON requests, runs the split, summary, conversion, and plan
//! calculations, and prints JSON reports.

mod cli;
mod commands;
mod request;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expensio_shared::{AppConfig, AppError};
use expensio_shared::config::LoggingConfig;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // Initialize tracing
    init_tracing(&config.logging);

    match run(&cli, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = format!("{err:#}");
            let app_error = into_app_error(err);
            error!(code = app_error.error_code(), error = %message, "Command failed");
            ExitCode::from(app_error.exit_code())
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.as_str().into());

    // Logs go to stderr so stdout carries only the report
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    match &cli.command {
        Command::Split { request } => {
            let report = commands::split(config, &read_json(request)?)?;
            render(&report, cli.pretty)
        }
        Command::Summary { request } => {
            let report = commands::summary(config, &read_json(request)?)?;
            render(&report, cli.pretty)
        }
        Command::Convert {
            amount,
            from,
            to,
            date,
            rates,
        } => {
            let report = commands::convert(amount, *from, *to, *date, read_json(rates)?)?;
            render(&report, cli.pretty)
        }
        Command::Plan { request, today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let report = commands::plan(&read_json(request)?, today)?;
            render(&report, cli.pretty)
        }
    }
}

/// Recovers the domain error behind a failure; anything else is internal.
fn into_app_error(err: anyhow::Error) -> AppError {
    err.downcast::<AppError>()
        .unwrap_or_else(|err| AppError::Internal(format!("{err:#}")))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::Internal(format!("Failed to read {}: {err}", path.display())))?;
    let value = serde_json::from_str(&raw)
        .map_err(|err| AppError::Validation(format!("{}: {err}", path.display())))?;
    Ok(value)
}

fn render<T: Serialize>(report: &T, pretty: bool) -> anyhow::Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(output)
}
