// rvanon - RVTools inventory anonymizer
// Copyright (c) 2025 rvanon Contributors
// Licensed under the MIT License

use clap::Parser;
use rvanon::cli::{Cli, Commands};
use rvanon::config::{load_config_or_default, RvanonConfig};
use rvanon::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // validate-config reports its own load errors
    if let Commands::ValidateConfig(args) = &cli.command {
        let _guard = init_logging(
            cli.log_level.as_deref().unwrap_or("info"),
            &Default::default(),
        );
        process::exit(exit_code(args.execute(cli.config.as_deref())));
    }

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "rvanon - RVTools inventory anonymizer"
    );

    let code = exit_code(execute_command(&cli, &config));

    // Flush the file logger before exiting
    drop(guard);
    process::exit(code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &RvanonConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Consolidate(args) => args.execute(config),
        Commands::Anonymize(args) => args.execute(config),
        Commands::Deanonymize(args) => args.execute(config),
        Commands::Both(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()),
    }
}

fn exit_code(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            rvanon::log_error_with_context!(message, "Command execution failed");
            eprintln!("Error: {message}");
            5 // Fatal error exit code
        }
    }
}
