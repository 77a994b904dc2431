//! Ideagauge CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use ideagauge::cli::{commands, context, handle_error, Cli};
use ideagauge::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let config = match context::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            handle_error(&err, json_mode);
            return ExitCode::FAILURE;
        }
    };

    // Held until exit so the file writer flushes.
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    match commands::dispatch(cli.command, &config, json_mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            handle_error(&err, json_mode);
            ExitCode::FAILURE
        }
    }
}
