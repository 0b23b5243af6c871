//! Validate command implementation
//!
//! Loads a sweep configuration, checks it and its file name template, and
//! prints what the sweep would do.

use crate::config::sweep::GroupingStyle;
use crate::config::load_sweep_config;
use crate::core::planner::ExportPlan;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Sweep configuration file (JSON)
    pub sweep: String,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(sweep = %self.sweep, "Validating sweep configuration");

        println!("🔍 Validating sweep configuration: {}", self.sweep);
        println!();

        let config = match load_sweep_config(&self.sweep) {
            Ok(c) => {
                println!("✅ Sweep configuration loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load sweep configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let plan = match ExportPlan::new(&config) {
            Ok(plan) => {
                println!("✅ File name template is valid");
                plan
            }
            Err(e) => {
                println!("❌ Planning failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Sweep Summary:");
        println!("  Output Directory: {}", config.output_directory.display());
        println!("  Bodies: {}", join(config.bodies_to_export.iter()));
        println!("  Parameters:");
        if config.parameters_to_iterate.is_empty() {
            println!("    (none)");
        }
        for spec in config.parameters_to_iterate.iter() {
            println!(
                "    {} (token '{}'{}): {}",
                spec.name,
                spec.token(),
                if spec.grouping { ", grouping" } else { "" },
                join(spec.variants.iter())
            );
        }
        println!("  File Type: {}", config.export_options.file_type);
        println!("  STL Quality: {}", config.export_options.stl_quality);
        println!("  File Name Template: {}", plan.planner().template().source());
        println!("  Force Recompute: {}", config.export_options.force_recompute);
        println!(
            "  Grouping: {}",
            match config.export_options.grouping_style {
                GroupingStyle::Nested => "nested folders",
                GroupingStyle::Joined => "single joined folder",
            }
        );
        println!("  Combinations: {}", plan.total_combinations());
        println!("  Total Jobs: {}", plan.total_jobs());
        println!();

        let collisions = plan.find_collisions();
        if !collisions.is_empty() {
            println!(
                "⚠️  {} output path(s) are written by more than one job (run `plan` for details)",
                collisions.len()
            );
            println!();
        }

        Ok(0)
    }
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}
