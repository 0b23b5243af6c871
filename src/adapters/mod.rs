//! CAD backends
//!
//! - [`model`] - The [`CadModel`](model::CadModel) trait and backend factory
//! - [`dry_run`] - Records calls, writes nothing
//! - [`openscad`] - Renders `.scad` models with the OpenSCAD binary
//!
//! # Design Pattern
//!
//! Backends follow the **Adapter Pattern**: the export coordinator only sees
//! the trait, so tests substitute a fake model with the same three
//! operations.
//!
//! ```rust,no_run
//! use parametric_export::adapters::model::create_model;
//! use parametric_export::config::load_settings;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = load_settings("parametric-export.toml")?;
//! let model = create_model(&settings, false)?;
//! println!("Backend: {}", model.name());
//! # Ok(())
//! # }
//! ```

pub mod dry_run;
pub mod model;
pub mod openscad;
