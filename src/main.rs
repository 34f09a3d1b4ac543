// Fairwatt - Meter List Console for Field Verification
// Copyright (c) 2025 Fairwatt Contributors
// Licensed under the MIT License

use fairwatt::cli::{Cli, Commands};
use fairwatt::config::{load_config, LoggingConfig};
use fairwatt::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report their own configuration errors afterwards.
    let (configured_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(configured_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Fairwatt - Meter List Console"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::List(args) => args.execute(&cli.config).await,
        Commands::Show(args) => args.execute(&cli.config).await,
        Commands::Consumption(args) => args.execute(&cli.config).await,
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Plan(args) => args.execute(&cli.config).await,
        Commands::Note(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
