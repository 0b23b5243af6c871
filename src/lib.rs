// Parametric Export - batch export of parametric CAD variants
// Copyright (c) 2025 Parametric Export Contributors
// Licensed under the MIT License

//! # Parametric Export
//!
//! Batch-exports every variant of a parametric CAD model. A sweep
//! configuration names the parameters to vary and their values; the tool
//! walks the Cartesian product of those values, applies each combination to
//! the model, recomputes it and writes one file per requested body into a
//! deterministic folder and file name layout.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Combination generation, path planning and export orchestration
//! - [`adapters`] - CAD backends (dry-run, OpenSCAD)
//! - [`domain`] - Names, values and error types
//! - [`config`] - Sweep configuration and tool settings
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parametric_export::adapters::dry_run::DryRunModel;
//! use parametric_export::config::load_sweep_config;
//! use parametric_export::core::export::{ExportCoordinator, SignalProgress};
//! use parametric_export::core::planner::ExportPlan;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_sweep_config("drawer.json")?;
//!     let plan = ExportPlan::new(&config)?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let mut coordinator = ExportCoordinator::new(plan);
//!     let summary = coordinator
//!         .execute_export(&mut DryRunModel::new(), &mut SignalProgress::new(shutdown_rx))
//!         .await?;
//!
//!     println!("Exported {} files", summary.successful_jobs);
//!     Ok(())
//! }
//! ```
//!
//! ## Naming
//!
//! With parameters `COLUMNS` (token `c`, grouping) and `ROWS` (token `r`),
//! body `Drawer` is written to:
//!
//! ```text
//! output/c1/Drawer-c1-r1.stl
//! output/c1/Drawer-c1-r2.stl
//! output/c2/Drawer-c2-r1.stl
//! ...
//! ```
//!
//! A `fileNameTemplate` such as `"{bodyName}-{COLUMNS}x{ROWS}"` replaces the
//! default file name; unknown placeholders are rejected before any job runs.
//!
//! ## Error Handling
//!
//! Configuration and planning errors are [`domain::SweepError`]s and stop the
//! run up front. Model failures are [`domain::ModelError`]s, recorded per job
//! while the batch carries on.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
