//! Core logic for parametric export.
//!
//! # Modules
//!
//! - [`combination`] - Cartesian product of parameter variants
//! - [`planner`] - Output paths, file name templates and the job plan
//! - [`export`] - Sequential execution against a CAD model
//!
//! # Export Workflow
//!
//! 1. **Validate**: the sweep configuration is checked before anything runs
//! 2. **Plan**: the template is parsed and the job count computed
//! 3. **Run**: per combination, apply parameters, recompute, export each body
//! 4. **Report**: failures and skipped jobs are collected into a summary
//!
//! # Example
//!
//! ```rust,no_run
//! use parametric_export::adapters::dry_run::DryRunModel;
//! use parametric_export::config::load_sweep_config;
//! use parametric_export::core::export::{ExportCoordinator, SignalProgress};
//! use parametric_export::core::planner::ExportPlan;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_sweep_config("drawer.json")?;
//! let plan = ExportPlan::new(&config)?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let mut progress = SignalProgress::new(shutdown_rx);
//! let mut model = DryRunModel::new();
//!
//! let mut coordinator = ExportCoordinator::new(plan).with_dry_run(true);
//! let summary = coordinator.execute_export(&mut model, &mut progress).await?;
//!
//! println!("Succeeded: {}", summary.successful_jobs);
//! println!("Failed: {}", summary.failed_jobs);
//! # Ok(())
//! # }
//! ```

pub mod combination;
pub mod export;
pub mod planner;
