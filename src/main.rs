// Parametric Export - batch export of parametric CAD variants
// Copyright (c) 2025 Parametric Export Contributors
// Licensed under the MIT License

use clap::Parser;
use parametric_export::cli::{Cli, Commands};
use parametric_export::config::{load_settings_or_default, LoggingConfig};
use parametric_export::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging is configured in the settings file; a broken settings file
    // is reported by the command itself, so fall back to console logging here
    let settings = load_settings_or_default(cli.settings.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| settings.as_ref().map(|s| s.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = settings
        .map(|s| s.logging)
        .unwrap_or_else(LoggingConfig::default);

    let log_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Parametric Export - batch export of parametric CAD variants"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn signal handler task
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), stopping after current combination");
                    println!("\n⚠️  Shutdown signal received, finishing current combination...");
                    let _ = shutdown_tx.send(true);
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, stopping after current combination");
                    println!("\n⚠️  Shutdown signal received, finishing current combination...");
                    let _ = shutdown_tx.send(true);
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), stopping after current combination");
                println!("\n⚠️  Shutdown signal received, finishing current combination...");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(log_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(cli.settings.as_deref(), shutdown_signal).await,
        Commands::Plan(args) => args.execute().await,
        Commands::Validate(args) => args.execute().await,
        Commands::Init(args) => args.execute().await,
    }
}
