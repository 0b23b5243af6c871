//! Configuration management.
//!
//! Two inputs configure a run:
//!
//! - the **sweep configuration** (JSON, [`sweep`]) names the parameters to
//!   vary, the bodies to export and how output files are named;
//! - the optional **tool settings** (TOML, [`schema`] and [`loader`]) pick the
//!   CAD backend, log level and log files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parametric_export::config::{load_settings, load_sweep_config};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sweep = load_sweep_config("drawer.json")?;
//! println!("{} jobs", sweep.total_jobs());
//!
//! let settings = load_settings("parametric-export.toml")?;
//! println!("Backend: {:?}", settings.backend.kind);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Settings
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [backend]
//! kind = "openscad"
//!
//! [backend.openscad]
//! binary = "${OPENSCAD_BIN}"
//! model = "drawer.scad"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders in the settings file are substituted from the
//! environment, and `PARAMETRIC_EXPORT_<SECTION>_<KEY>` variables override
//! individual settings.

pub mod loader;
pub mod schema;
pub mod sweep;

// Re-export commonly used types
pub use loader::{load_settings, load_settings_or_default};
pub use schema::{
    ApplicationConfig, BackendConfig, BackendKind, LoggingConfig, OpenScadConfig, Settings,
};
pub use sweep::{
    load_sweep_config, ExportOptions, FileType, GroupingStyle, ParameterSet, ParameterSpec,
    StlQuality, SweepConfig,
};
