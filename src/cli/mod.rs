//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Parametric Export - batch export of parametric CAD variants
#[derive(Parser, Debug)]
#[command(name = "parametric-export")]
#[command(version, about, long_about = None)]
#[command(author = "Parametric Export Contributors")]
pub struct Cli {
    /// Path to the tool settings file (TOML); defaults apply when omitted
    #[arg(short, long, env = "PARAMETRIC_EXPORT_SETTINGS")]
    pub settings: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PARAMETRIC_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every job of a sweep
    Export(commands::export::ExportArgs),

    /// Print the planned output paths without running anything
    Plan(commands::plan::PlanArgs),

    /// Validate a sweep configuration
    Validate(commands::validate::ValidateArgs),

    /// Write a sample sweep configuration
    Init(commands::init::InitArgs),
}
