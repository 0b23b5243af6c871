//! OpenSCAD backend
//!
//! Drives the `openscad` command-line binary. Parameter assignments are kept
//! as `-D name=value` overrides and every export renders the model from
//! scratch with the current overrides, so OpenSCAD itself holds no state
//! between jobs.
//!
//! - [`command`] - Builds the command line for one export
//! - [`adapter`] - [`CadModel`](crate::adapters::model::CadModel) implementation

pub mod adapter;
pub mod command;

pub use adapter::OpenScadModel;
pub use command::ExportCommand;
