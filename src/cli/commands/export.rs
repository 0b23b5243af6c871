//! Export command implementation
//!
//! This module implements the `export` command, which runs every job of a
//! sweep against the configured CAD backend.

use crate::adapters::model::create_model;
use crate::config::{load_settings_or_default, load_sweep_config};
use crate::core::export::{BatchState, ExportCoordinator, ExportSummary, SignalProgress};
use crate::core::planner::ExportPlan;
use clap::Args;
use tokio::sync::watch;

/// Failures printed before the list is truncated
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Sweep configuration file (JSON)
    pub sweep: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - log every model call without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print progress every N jobs
    #[arg(long, default_value_t = 1)]
    pub progress_every: usize,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        settings_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(sweep = %self.sweep, "Starting export command");

        let settings = match load_settings_or_default(settings_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load settings");
                eprintln!("Failed to load settings: {e}");
                return Ok(2);
            }
        };

        let config = match load_sweep_config(&self.sweep) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Sweep configuration is invalid");
                eprintln!("Sweep configuration is invalid: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let plan = match ExportPlan::new(&config) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Planning failed");
                eprintln!("Planning failed: {e}");
                return Ok(2);
            }
        };

        let dry_run = self.dry_run || settings.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Export Configuration:");
            println!("  Output Directory: {}", config.output_directory.display());
            println!("  Bodies: {}", config.bodies_to_export.len());
            println!("  Combinations: {}", plan.total_combinations());
            println!("  Total Jobs: {}", plan.total_jobs());
            println!("  File Type: {}", config.export_options.file_type);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        let mut model = match create_model(&settings, dry_run) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create CAD model");
                eprintln!("Failed to create CAD model: {e}");
                return Ok(2);
            }
        };
        let mut progress =
            SignalProgress::new(shutdown_signal).with_print_every(self.progress_every);

        println!("🚀 Starting export...");
        println!();

        let mut coordinator = ExportCoordinator::new(plan).with_dry_run(dry_run);
        let summary = match coordinator
            .execute_export(model.as_mut(), &mut progress)
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);
        Ok(exit_code(&summary))
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Run ID: {}", summary.run_id);
    println!("  Total Jobs: {}", summary.total_jobs);
    println!("  Succeeded: {}", summary.successful_jobs);
    println!("  Failed: {}", summary.failed_jobs);
    println!("  Skipped: {}", summary.skipped_jobs);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.collisions.is_empty() {
        println!(
            "⚠️  {} output path(s) were written by more than one job",
            summary.collisions.len()
        );
        println!();
    }

    if !summary.failures.is_empty() {
        println!("⚠️  Failed jobs:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {}: {}", failure.kind, failure);
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }

    match summary.state {
        BatchState::Cancelled => {
            println!("⚠️  Export cancelled. Files written so far were kept.");
            tracing::info!("Export interrupted by user signal");
        }
        _ if summary.is_successful() => println!("✅ Export completed successfully!"),
        _ if summary.failed_jobs > 0 => println!("⚠️  Export completed with failures"),
        _ => println!("❌ Export did not complete"),
    }
}

/// Process exit code for a finished batch
fn exit_code(summary: &ExportSummary) -> i32 {
    match summary.state {
        BatchState::Cancelled => 130, // SIGINT exit code (standard Unix convention)
        _ if summary.is_successful() => 0,
        _ if summary.failed_jobs > 0 => 1, // Partial success
        _ => 5,
    }
}
