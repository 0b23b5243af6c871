//! Plan command implementation
//!
//! Prints every output path of a sweep in execution order. Nothing is
//! created or exported.

use crate::config::load_sweep_config;
use crate::core::planner::ExportPlan;
use clap::Args;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Sweep configuration file (JSON)
    pub sweep: String,

    /// Print at most this many jobs
    #[arg(long)]
    pub limit: Option<usize>,
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(sweep = %self.sweep, "Planning sweep");

        let plan = match load_sweep_config(&self.sweep).and_then(|config| ExportPlan::new(&config)) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::error!(error = %e, "Planning failed");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        println!(
            "📋 {} job(s): {} combination(s) × {} body(ies)",
            plan.total_jobs(),
            plan.total_combinations(),
            plan.bodies().len()
        );
        println!();

        let limit = self.limit.unwrap_or(usize::MAX);
        for (position, job) in plan.jobs().take(limit).enumerate() {
            println!("  {:>5}  {}", position + 1, job);
        }
        if limit < plan.total_jobs() {
            println!("  ... and {} more", plan.total_jobs() - limit);
        }

        let collisions = plan.find_collisions();
        if !collisions.is_empty() {
            println!();
            println!("⚠️  Output path collisions (later jobs overwrite earlier ones):");
            for collision in &collisions {
                println!("  {}", collision.path.display());
                for job in &collision.jobs {
                    println!("    - {job}");
                }
            }
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_plan_does_not_create_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        fs::write(
            &path,
            r#"{ "outputDirectory": "out", "bodiesToExport": ["Drawer"],
                 "parametersToIterate": { "COLUMNS": { "variants": [1, 2, 3] } } }"#,
        )
        .unwrap();

        let args = PlanArgs {
            sweep: path.to_string_lossy().to_string(),
            limit: Some(2),
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_plan_invalid_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        fs::write(&path, r#"{ "bodiesToExport": [], "parametersToIterate": {} }"#).unwrap();

        let args = PlanArgs {
            sweep: path.to_string_lossy().to_string(),
            limit: None,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
    }
}
